use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::companies::InsertCompanyEntity,
    repositories::{companies::CompanyRepository, plans::PlanRepository},
    value_objects::{
        companies::{CompanyDto, RegisterCompanyModel, UpdateCompanyStatusModel},
        enums::subscription_statuses::SubscriptionStatus,
        phones::normalize_phone,
    },
};

#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("invalid company data: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl CompanyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CompanyError::PlanNotFound => StatusCode::NOT_FOUND,
            CompanyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CompanyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CompanyResult<T> = std::result::Result<T, CompanyError>;

/// Tenant onboarding and the platform-admin controls over a tenant's
/// active/block flags and assigned plan.
pub struct CompanyUseCase<C, P>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    plan_repo: Arc<P>,
}

impl<C, P> CompanyUseCase<C, P>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, plan_repo: Arc<P>) -> Self {
        Self {
            company_repo,
            plan_repo,
        }
    }

    pub async fn register(&self, register_company: RegisterCompanyModel) -> CompanyResult<Uuid> {
        if register_company.legal_name.trim().is_empty() {
            return Err(CompanyError::Validation("legal name is required".into()));
        }
        if register_company.tax_document.trim().is_empty() {
            return Err(CompanyError::Validation("tax document is required".into()));
        }

        let phone = match register_company.phone.as_deref() {
            Some(raw) => Some(
                normalize_phone(raw)
                    .map_err(|err| {
                        warn!(error = %err, "companies: rejected contact phone");
                        CompanyError::Validation(err.to_string())
                    })?
                    .e164,
            ),
            None => None,
        };

        // A chosen plan starts the trial clock from its configured trial days.
        let (plan_id, trial_ends_at, status) = match register_company.plan_id {
            Some(plan_id) => {
                let plan = self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
                    warn!(%plan_id, db_error = ?err, "companies: plan not found at registration");
                    CompanyError::PlanNotFound
                })?;

                let trial_ends_at = (plan.trial_days > 0)
                    .then(|| Utc::now() + Duration::days(i64::from(plan.trial_days)));
                let status = if trial_ends_at.is_some() {
                    SubscriptionStatus::Trialing
                } else {
                    SubscriptionStatus::Pending
                };

                (Some(plan.id), trial_ends_at, status)
            }
            None => (None, None, SubscriptionStatus::Pending),
        };

        let now = Utc::now();
        let company_id = self
            .company_repo
            .register(InsertCompanyEntity {
                legal_name: register_company.legal_name,
                fantasy_name: register_company.fantasy_name,
                tax_document: register_company.tax_document,
                email: register_company.email,
                phone,
                plan_id,
                is_active: true,
                is_blocked: false,
                trial_ends_at,
                subscription_status: status.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "companies: failed to register company");
                CompanyError::Internal(err)
            })?;

        info!(%company_id, status = %status, "companies: company registered");
        Ok(company_id)
    }

    pub async fn list(&self) -> CompanyResult<Vec<CompanyDto>> {
        let companies = self.company_repo.list().await.map_err(|err| {
            error!(db_error = ?err, "companies: failed to list companies");
            CompanyError::Internal(err)
        })?;

        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }

    /// Platform-admin kill switch. The flags written here override any
    /// billing state at the gate.
    pub async fn update_status(
        &self,
        company_id: Uuid,
        update_status: UpdateCompanyStatusModel,
    ) -> CompanyResult<()> {
        self.company_repo
            .update_status(company_id, update_status.is_active, update_status.is_blocked)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "companies: failed to update status flags"
                );
                CompanyError::Internal(err)
            })?;

        info!(
            %company_id,
            is_active = update_status.is_active,
            is_blocked = update_status.is_blocked,
            "companies: status flags updated"
        );
        Ok(())
    }

    pub async fn assign_plan(
        &self,
        company_id: Uuid,
        plan_id: Option<Uuid>,
    ) -> CompanyResult<()> {
        if let Some(plan_id) = plan_id {
            self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
                warn!(%plan_id, db_error = ?err, "companies: plan not found for assignment");
                CompanyError::PlanNotFound
            })?;
        }

        self.company_repo
            .assign_plan(company_id, plan_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "companies: failed to assign plan"
                );
                CompanyError::Internal(err)
            })?;

        info!(%company_id, ?plan_id, "companies: plan assignment updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entities::plans::PlanEntity;
    use domain::repositories::{companies::MockCompanyRepository, plans::MockPlanRepository};
    use domain::value_objects::plans::PlanPermissions;
    use mockall::predicate::eq;

    fn register_model(phone: Option<&str>, plan_id: Option<Uuid>) -> RegisterCompanyModel {
        RegisterCompanyModel {
            legal_name: "Studio Bela Ltda".to_string(),
            fantasy_name: Some("Studio Bela".to_string()),
            tax_document: "12345678000190".to_string(),
            email: "contato@studiobela.example".to_string(),
            phone: phone.map(|p| p.to_string()),
            plan_id,
        }
    }

    fn sample_plan(plan_id: Uuid, trial_days: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: plan_id,
            name: "Essencial".to_string(),
            price_minor: 9_900,
            annual_price_minor: None,
            trial_days,
            max_professionals: 3,
            permissions: PlanPermissions::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn register_normalizes_phone_and_starts_trial() {
        let plan_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id, 7);
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(plan) })
            });

        let mut company_repo = MockCompanyRepository::new();
        company_repo
            .expect_register()
            .withf(|insert| {
                insert.phone.as_deref() == Some("+5511987654321")
                    && insert.trial_ends_at.is_some()
                    && insert.subscription_status == "trialing"
            })
            .returning(move |_| Box::pin(async move { Ok(company_id) }));

        let usecase = CompanyUseCase::new(Arc::new(company_repo), Arc::new(plan_repo));

        let created = usecase
            .register(register_model(Some("(11) 98765-4321"), Some(plan_id)))
            .await
            .unwrap();

        assert_eq!(created, company_id);
    }

    #[tokio::test]
    async fn register_rejects_invalid_phone() {
        let usecase = CompanyUseCase::new(
            Arc::new(MockCompanyRepository::new()),
            Arc::new(MockPlanRepository::new()),
        );

        let err = usecase
            .register(register_model(Some("not a phone"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, CompanyError::Validation(_)));
    }

    #[tokio::test]
    async fn register_without_plan_is_pending_with_no_trial() {
        let mut company_repo = MockCompanyRepository::new();
        company_repo
            .expect_register()
            .withf(|insert| {
                insert.plan_id.is_none()
                    && insert.trial_ends_at.is_none()
                    && insert.subscription_status == "pending"
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase =
            CompanyUseCase::new(Arc::new(company_repo), Arc::new(MockPlanRepository::new()));

        usecase.register(register_model(None, None)).await.unwrap();
    }

    #[tokio::test]
    async fn assign_plan_requires_existing_plan() {
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("no rows")) }));

        let usecase =
            CompanyUseCase::new(Arc::new(MockCompanyRepository::new()), Arc::new(plan_repo));

        let err = usecase
            .assign_plan(Uuid::new_v4(), Some(plan_id))
            .await
            .unwrap_err();

        assert!(matches!(err, CompanyError::PlanNotFound));
    }
}
