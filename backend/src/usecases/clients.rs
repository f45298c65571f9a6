use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::access_gate::{GuardError, TenantGuard};
use domain::{
    entities::clients::{InsertClientEntity, UpdateClientEntity},
    repositories::{
        clients::ClientRepository, companies::CompanyRepository, plans::PlanRepository,
    },
    value_objects::{
        clients::{ClientDto, InsertClientModel, UpdateClientModel},
        enums::feature_keys::FeatureKey,
        phones::normalize_phone,
    },
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client not found")]
    NotFound,
    #[error("invalid client data: {0}")]
    Validation(String),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClientError::NotFound => StatusCode::NOT_FOUND,
            ClientError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ClientError::Guard(guard_error) => guard_error.status_code(),
            ClientError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Tenant client book.
pub struct ClientUseCase<Cl, C, P>
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    client_repo: Arc<Cl>,
    guard: TenantGuard<C, P>,
}

impl<Cl, C, P> ClientUseCase<Cl, C, P>
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(client_repo: Arc<Cl>, guard: TenantGuard<C, P>) -> Self {
        Self { client_repo, guard }
    }

    pub async fn list(&self, company_id: Uuid) -> ClientResult<Vec<ClientDto>> {
        self.guard.authorize(company_id, FeatureKey::Clients).await?;

        let clients = self
            .client_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "clients: failed to list clients");
                ClientError::Internal(err)
            })?;

        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        insert_client: InsertClientModel,
    ) -> ClientResult<Uuid> {
        self.guard.authorize(company_id, FeatureKey::Clients).await?;

        if insert_client.name.trim().is_empty() {
            return Err(ClientError::Validation("name is required".into()));
        }

        let phone = normalize_optional_phone(insert_client.phone.as_deref())?;

        let now = Utc::now();
        let client_id = self
            .client_repo
            .create(InsertClientEntity {
                company_id,
                name: insert_client.name,
                email: insert_client.email,
                phone,
                notes: insert_client.notes,
                birth_date: insert_client.birth_date,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "clients: failed to create client");
                ClientError::Internal(err)
            })?;

        info!(%company_id, %client_id, "clients: client created");
        Ok(client_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        client_id: Uuid,
        update_client: UpdateClientModel,
    ) -> ClientResult<()> {
        self.guard.authorize(company_id, FeatureKey::Clients).await?;

        self.client_repo
            .find_by_id(company_id, client_id)
            .await
            .map_err(ClientError::Internal)?
            .ok_or(ClientError::NotFound)?;

        let phone = normalize_optional_phone(update_client.phone.as_deref())?;

        self.client_repo
            .update(
                company_id,
                client_id,
                UpdateClientEntity {
                    name: update_client.name,
                    email: update_client.email,
                    phone,
                    notes: update_client.notes,
                    birth_date: update_client.birth_date,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %client_id,
                    db_error = ?err,
                    "clients: failed to update client"
                );
                ClientError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, client_id: Uuid) -> ClientResult<()> {
        self.guard.authorize(company_id, FeatureKey::Clients).await?;

        self.client_repo
            .find_by_id(company_id, client_id)
            .await
            .map_err(ClientError::Internal)?
            .ok_or(ClientError::NotFound)?;

        self.client_repo
            .soft_delete(company_id, client_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %client_id,
                    db_error = ?err,
                    "clients: failed to delete client"
                );
                ClientError::Internal(err)
            })?;

        info!(%company_id, %client_id, "clients: client removed");
        Ok(())
    }
}

fn normalize_optional_phone(raw: Option<&str>) -> ClientResult<Option<String>> {
    match raw {
        Some(raw) => Ok(Some(
            normalize_phone(raw)
                .map_err(|err| ClientError::Validation(err.to_string()))?
                .e164,
        )),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entities::{companies::CompanyEntity, plans::PlanEntity};
    use domain::repositories::{
        clients::MockClientRepository, companies::MockCompanyRepository,
        plans::MockPlanRepository,
    };
    use domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
    use domain::value_objects::plans::PlanPermissions;

    fn guard_with(
        permissions: PlanPermissions,
    ) -> TenantGuard<MockCompanyRepository, MockPlanRepository> {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let now = Utc::now();

        let company = CompanyEntity {
            id: company_id,
            legal_name: "Studio Bela Ltda".to_string(),
            fantasy_name: None,
            tax_document: "12345678000190".to_string(),
            email: "contato@studiobela.example".to_string(),
            phone: None,
            plan_id: Some(plan_id),
            is_active: true,
            is_blocked: false,
            trial_ends_at: None,
            subscription_status: SubscriptionStatus::Active.to_string(),
            asaas_subscription_id: None,
            next_due_date: None,
            created_at: now,
            updated_at: now,
        };

        let plan = PlanEntity {
            id: plan_id,
            name: "Essencial".to_string(),
            price_minor: 9_900,
            annual_price_minor: None,
            trial_days: 7,
            max_professionals: 3,
            permissions,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut company_repo = MockCompanyRepository::new();
        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_find_by_id().returning(move |_| {
            let plan = plan.clone();
            Box::pin(async move { Ok(plan) })
        });

        TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo))
    }

    #[tokio::test]
    async fn create_normalizes_phone() {
        let mut client_repo = MockClientRepository::new();
        client_repo
            .expect_create()
            .withf(|insert| insert.phone.as_deref() == Some("+5511987654321"))
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            guard_with(PlanPermissions {
                clients: true,
                ..Default::default()
            }),
        );

        usecase
            .create(
                Uuid::new_v4(),
                InsertClientModel {
                    name: "Mariana Lima".to_string(),
                    email: None,
                    phone: Some("(11) 98765-4321".to_string()),
                    notes: None,
                    birth_date: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_denied_without_clients_permission() {
        let usecase = ClientUseCase::new(
            Arc::new(MockClientRepository::new()),
            guard_with(PlanPermissions::default()),
        );

        let err = usecase.list(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::Guard(GuardError::PermissionDenied(_))));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn update_missing_client_is_not_found() {
        let mut client_repo = MockClientRepository::new();
        client_repo
            .expect_find_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = ClientUseCase::new(
            Arc::new(client_repo),
            guard_with(PlanPermissions {
                clients: true,
                ..Default::default()
            }),
        );

        let err = usecase
            .update(
                Uuid::new_v4(),
                Uuid::new_v4(),
                UpdateClientModel {
                    name: "Mariana Lima".to_string(),
                    email: None,
                    phone: None,
                    notes: None,
                    birth_date: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::NotFound));
    }
}
