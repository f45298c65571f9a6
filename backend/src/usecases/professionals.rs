use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::access_gate::{GuardError, TenantGuard};
use domain::{
    entities::professionals::{InsertProfessionalEntity, UpdateProfessionalEntity},
    repositories::{
        companies::CompanyRepository, plans::PlanRepository,
        professionals::ProfessionalRepository,
    },
    value_objects::{
        enums::feature_keys::FeatureKey,
        phones::normalize_phone,
        professionals::{InsertProfessionalModel, ProfessionalDto, UpdateProfessionalModel},
    },
};

#[derive(Debug, Error)]
pub enum ProfessionalError {
    #[error("Professional limit reached: plan allows {limit}, currently {current} active")]
    LimitReached { limit: i32, current: i64 },
    #[error("professional not found")]
    NotFound,
    #[error("invalid professional data: {0}")]
    Validation(String),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ProfessionalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProfessionalError::LimitReached { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ProfessionalError::NotFound => StatusCode::NOT_FOUND,
            ProfessionalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProfessionalError::Guard(guard_error) => guard_error.status_code(),
            ProfessionalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ProfessionalResult<T> = std::result::Result<T, ProfessionalError>;

/// Tenant professional roster. Creation is bounded by the plan's
/// professional headcount; the check here is the authoritative one, the
/// client-side mirror only disables the add button.
pub struct ProfessionalUseCase<Pr, C, P>
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    professional_repo: Arc<Pr>,
    guard: TenantGuard<C, P>,
}

impl<Pr, C, P> ProfessionalUseCase<Pr, C, P>
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(professional_repo: Arc<Pr>, guard: TenantGuard<C, P>) -> Self {
        Self {
            professional_repo,
            guard,
        }
    }

    pub async fn list(&self, company_id: Uuid) -> ProfessionalResult<Vec<ProfessionalDto>> {
        self.guard
            .authorize(company_id, FeatureKey::Professionals)
            .await?;

        let professionals = self
            .professional_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "professionals: failed to list professionals"
                );
                ProfessionalError::Internal(err)
            })?;

        Ok(professionals
            .into_iter()
            .map(ProfessionalDto::from)
            .collect())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        insert_professional: InsertProfessionalModel,
    ) -> ProfessionalResult<Uuid> {
        let (_, plan) = self
            .guard
            .authorize(company_id, FeatureKey::Professionals)
            .await?;

        let plan = plan.ok_or_else(|| {
            ProfessionalError::Internal(anyhow::anyhow!(
                "professionals feature granted without a plan"
            ))
        })?;

        let current = self
            .professional_repo
            .count_active(company_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "professionals: failed to count active professionals"
                );
                ProfessionalError::Internal(err)
            })?;

        let limit = plan.max_professionals;
        if limit <= 0 || current >= i64::from(limit) {
            warn!(
                %company_id,
                limit,
                current_active = current,
                status = StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                "professionals: headcount limit reached"
            );
            return Err(ProfessionalError::LimitReached { limit, current });
        }

        if insert_professional.name.trim().is_empty() {
            return Err(ProfessionalError::Validation("name is required".into()));
        }

        let phone = normalize_optional_phone(insert_professional.phone.as_deref())?;

        let now = Utc::now();
        let professional_id = self
            .professional_repo
            .create(InsertProfessionalEntity {
                company_id,
                name: insert_professional.name,
                email: insert_professional.email,
                phone,
                specialty: insert_professional.specialty,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "professionals: failed to create professional"
                );
                ProfessionalError::Internal(err)
            })?;

        info!(
            %company_id,
            %professional_id,
            headcount = current + 1,
            limit,
            "professionals: professional created"
        );
        Ok(professional_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        professional_id: Uuid,
        update_professional: UpdateProfessionalModel,
    ) -> ProfessionalResult<()> {
        self.guard
            .authorize(company_id, FeatureKey::Professionals)
            .await?;

        self.professional_repo
            .find_by_id(company_id, professional_id)
            .await
            .map_err(ProfessionalError::Internal)?
            .ok_or(ProfessionalError::NotFound)?;

        let phone = normalize_optional_phone(update_professional.phone.as_deref())?;

        self.professional_repo
            .update(
                company_id,
                professional_id,
                UpdateProfessionalEntity {
                    name: update_professional.name,
                    email: update_professional.email,
                    phone,
                    specialty: update_professional.specialty,
                    is_active: update_professional.is_active,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %professional_id,
                    db_error = ?err,
                    "professionals: failed to update professional"
                );
                ProfessionalError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, professional_id: Uuid) -> ProfessionalResult<()> {
        self.guard
            .authorize(company_id, FeatureKey::Professionals)
            .await?;

        self.professional_repo
            .find_by_id(company_id, professional_id)
            .await
            .map_err(ProfessionalError::Internal)?
            .ok_or(ProfessionalError::NotFound)?;

        self.professional_repo
            .soft_delete(company_id, professional_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %professional_id,
                    db_error = ?err,
                    "professionals: failed to delete professional"
                );
                ProfessionalError::Internal(err)
            })?;

        info!(%company_id, %professional_id, "professionals: professional removed");
        Ok(())
    }
}

fn normalize_optional_phone(raw: Option<&str>) -> ProfessionalResult<Option<String>> {
    match raw {
        Some(raw) => Ok(Some(
            normalize_phone(raw)
                .map_err(|err| ProfessionalError::Validation(err.to_string()))?
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
        companies::MockCompanyRepository, plans::MockPlanRepository,
        professionals::MockProfessionalRepository,
    };
    use domain::value_objects::access::BlockReason;
    use domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
    use domain::value_objects::plans::PlanPermissions;

    fn sample_company(company_id: Uuid, plan_id: Uuid) -> CompanyEntity {
        let now = Utc::now();
        CompanyEntity {
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
        }
    }

    fn sample_plan(plan_id: Uuid, max_professionals: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: plan_id,
            name: "Essencial".to_string(),
            price_minor: 9_900,
            annual_price_minor: None,
            trial_days: 7,
            max_professionals,
            permissions: PlanPermissions {
                professionals: true,
                ..Default::default()
            },
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase_with(
        company: CompanyEntity,
        plan: PlanEntity,
        current_count: i64,
        expect_create: bool,
    ) -> ProfessionalUseCase<MockProfessionalRepository, MockCompanyRepository, MockPlanRepository>
    {
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

        let mut professional_repo = MockProfessionalRepository::new();
        professional_repo
            .expect_count_active()
            .returning(move |_| Box::pin(async move { Ok(current_count) }));
        if expect_create {
            professional_repo
                .expect_create()
                .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));
        }

        ProfessionalUseCase::new(
            Arc::new(professional_repo),
            TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo)),
        )
    }

    fn insert_model() -> InsertProfessionalModel {
        InsertProfessionalModel {
            name: "Ana Souza".to_string(),
            email: Some("ana@studiobela.example".to_string()),
            phone: Some("(11) 98765-4321".to_string()),
            specialty: Some("Coloracao".to_string()),
        }
    }

    #[tokio::test]
    async fn create_blocked_at_limit_names_the_numbers() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let usecase = usecase_with(
            sample_company(company_id, plan_id),
            sample_plan(plan_id, 3),
            3,
            false,
        );

        let err = usecase.create(company_id, insert_model()).await.unwrap_err();

        match err {
            ProfessionalError::LimitReached { limit, current } => {
                assert_eq!(limit, 3);
                assert_eq!(current, 3);
            }
            other => panic!("expected LimitReached, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_passes_below_limit() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let usecase = usecase_with(
            sample_company(company_id, plan_id),
            sample_plan(plan_id, 3),
            2,
            true,
        );

        usecase.create(company_id, insert_model()).await.unwrap();
    }

    #[tokio::test]
    async fn create_blocked_for_delinquent_company() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let mut company = sample_company(company_id, plan_id);
        company.subscription_status = SubscriptionStatus::PastDue.to_string();

        let usecase = usecase_with(company, sample_plan(plan_id, 3), 0, false);

        let err = usecase.create(company_id, insert_model()).await.unwrap_err();
        assert!(matches!(
            err,
            ProfessionalError::Guard(GuardError::Blocked(BlockReason::Billing(_)))
        ));
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn create_rejects_bad_phone() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let usecase = usecase_with(
            sample_company(company_id, plan_id),
            sample_plan(plan_id, 3),
            0,
            false,
        );

        let mut model = insert_model();
        model.phone = Some("12".to_string());

        let err = usecase.create(company_id, model).await.unwrap_err();
        assert!(matches!(err, ProfessionalError::Validation(_)));
    }
}
