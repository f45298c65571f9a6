use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::access_gate::{GuardError, TenantGuard};
use domain::{
    entities::services::{InsertServiceEntity, UpdateServiceEntity},
    repositories::{
        companies::CompanyRepository, plans::PlanRepository, services::ServiceRepository,
    },
    value_objects::{
        enums::feature_keys::FeatureKey,
        services::{InsertServiceModel, ServiceDto, UpdateServiceModel},
    },
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service not found")]
    NotFound,
    #[error("invalid service data: {0}")]
    Validation(String),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Guard(guard_error) => guard_error.status_code(),
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Tenant service catalog (cuts, treatments, consultations).
pub struct ServiceUseCase<S, C, P>
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    service_repo: Arc<S>,
    guard: TenantGuard<C, P>,
}

impl<S, C, P> ServiceUseCase<S, C, P>
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(service_repo: Arc<S>, guard: TenantGuard<C, P>) -> Self {
        Self {
            service_repo,
            guard,
        }
    }

    pub async fn list(&self, company_id: Uuid) -> ServiceResult<Vec<ServiceDto>> {
        self.guard
            .authorize(company_id, FeatureKey::Services)
            .await?;

        let services = self
            .service_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "services: failed to list services");
                ServiceError::Internal(err)
            })?;

        Ok(services.into_iter().map(ServiceDto::from).collect())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        insert_service: InsertServiceModel,
    ) -> ServiceResult<Uuid> {
        self.guard
            .authorize(company_id, FeatureKey::Services)
            .await?;

        validate_service(
            &insert_service.name,
            insert_service.price_minor,
            insert_service.duration_minutes,
        )?;

        let now = Utc::now();
        let service_id = self
            .service_repo
            .create(InsertServiceEntity {
                company_id,
                name: insert_service.name,
                description: insert_service.description,
                price_minor: insert_service.price_minor,
                duration_minutes: insert_service.duration_minutes,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "services: failed to create service");
                ServiceError::Internal(err)
            })?;

        info!(%company_id, %service_id, "services: service created");
        Ok(service_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        update_service: UpdateServiceModel,
    ) -> ServiceResult<()> {
        self.guard
            .authorize(company_id, FeatureKey::Services)
            .await?;

        validate_service(
            &update_service.name,
            update_service.price_minor,
            update_service.duration_minutes,
        )?;

        self.service_repo
            .find_by_id(company_id, service_id)
            .await
            .map_err(ServiceError::Internal)?
            .ok_or(ServiceError::NotFound)?;

        self.service_repo
            .update(
                company_id,
                service_id,
                UpdateServiceEntity {
                    name: update_service.name,
                    description: update_service.description,
                    price_minor: update_service.price_minor,
                    duration_minutes: update_service.duration_minutes,
                    is_active: update_service.is_active,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %service_id,
                    db_error = ?err,
                    "services: failed to update service"
                );
                ServiceError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, service_id: Uuid) -> ServiceResult<()> {
        self.guard
            .authorize(company_id, FeatureKey::Services)
            .await?;

        self.service_repo
            .find_by_id(company_id, service_id)
            .await
            .map_err(ServiceError::Internal)?
            .ok_or(ServiceError::NotFound)?;

        self.service_repo
            .soft_delete(company_id, service_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %service_id,
                    db_error = ?err,
                    "services: failed to delete service"
                );
                ServiceError::Internal(err)
            })?;

        info!(%company_id, %service_id, "services: service removed");
        Ok(())
    }
}

fn validate_service(name: &str, price_minor: i32, duration_minutes: i32) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name is required".into()));
    }
    if price_minor < 0 {
        return Err(ServiceError::Validation("price must not be negative".into()));
    }
    if duration_minutes <= 0 {
        return Err(ServiceError::Validation(
            "duration must be a positive number of minutes".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_covers_name_price_and_duration() {
        assert!(validate_service("Corte", 5_000, 45).is_ok());
        assert!(validate_service("  ", 5_000, 45).is_err());
        assert!(validate_service("Corte", -1, 45).is_err());
        assert!(validate_service("Corte", 5_000, 0).is_err());
    }
}
