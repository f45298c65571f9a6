use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use domain::{
    entities::{companies::CompanyEntity, plans::PlanEntity},
    repositories::{companies::CompanyRepository, plans::PlanRepository},
    value_objects::{
        access::{AccessSnapshot, BlockReason, FetchState, GateState},
        enums::feature_keys::FeatureKey,
        plans::resolve_permission,
    },
};

/// Evaluates the subscription status gate for the authenticated tenant.
/// The outcome is always a state, never an error: a failed company fetch
/// collapses to a blocked state so delinquent tenants cannot slip through on
/// an outage.
pub struct AccessGateUseCase<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
}

impl<C> AccessGateUseCase<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>) -> Self {
        Self { company_repo }
    }

    pub async fn evaluate(&self, company_id: Uuid) -> GateState {
        let fetch = match self.company_repo.find_by_id(company_id).await {
            Ok(company) => FetchState::Resolved(AccessSnapshot::from(&company)),
            Err(err) => {
                error!(
                    %company_id,
                    db_error = ?err,
                    "access_gate: failed to load company, denying access"
                );
                FetchState::Rejected
            }
        };

        GateState::evaluate(&fetch)
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("{}", .0.message())]
    Blocked(BlockReason),
    #[error("Feature '{0}' is not enabled on the current plan")]
    PermissionDenied(FeatureKey),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl GuardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::Blocked(BlockReason::Administrative) => StatusCode::FORBIDDEN,
            GuardError::Blocked(BlockReason::Billing(_)) => StatusCode::PAYMENT_REQUIRED,
            GuardError::Blocked(BlockReason::StatusUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            GuardError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            GuardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type GuardResult<T> = std::result::Result<T, GuardError>;

/// Server-side mirror of the client gate: every tenant-scoped mutation path
/// runs through here before touching data. The client-side checks are UX
/// only and never trusted for enforcement.
pub struct TenantGuard<C, P>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    plan_repo: Arc<P>,
}

impl<C, P> TenantGuard<C, P>
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

    /// Loads the tenant, runs the gate, then the permission resolver for the
    /// requested feature. Returns the company and its plan so callers do not
    /// fetch them twice.
    pub async fn authorize(
        &self,
        company_id: Uuid,
        key: FeatureKey,
    ) -> GuardResult<(CompanyEntity, Option<PlanEntity>)> {
        let company = match self.company_repo.find_by_id(company_id).await {
            Ok(company) => company,
            Err(err) => {
                error!(
                    %company_id,
                    db_error = ?err,
                    "tenant_guard: failed to load company, denying access"
                );
                return Err(GuardError::Blocked(BlockReason::StatusUnavailable));
            }
        };

        let snapshot = AccessSnapshot::from(&company);
        if let GateState::Blocked(reason) = GateState::evaluate(&FetchState::Resolved(snapshot)) {
            warn!(
                %company_id,
                reason = reason.code(),
                "tenant_guard: request blocked by subscription gate"
            );
            return Err(GuardError::Blocked(reason));
        }

        let plan = match company.plan_id {
            Some(plan_id) => Some(self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
                error!(
                    %company_id,
                    %plan_id,
                    db_error = ?err,
                    "tenant_guard: failed to load plan"
                );
                GuardError::Internal(err)
            })?),
            None => None,
        };

        let permissions = plan.as_ref().map(|p| &p.permissions);
        if !resolve_permission(permissions, key) {
            warn!(
                %company_id,
                feature = %key,
                "tenant_guard: feature not enabled on plan"
            );
            return Err(GuardError::PermissionDenied(key));
        }

        Ok((company, plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        repositories::{companies::MockCompanyRepository, plans::MockPlanRepository},
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus, plans::PlanPermissions,
        },
    };
    use mockall::predicate::eq;

    fn sample_company(company_id: Uuid, plan_id: Option<Uuid>) -> CompanyEntity {
        let now = Utc::now();
        CompanyEntity {
            id: company_id,
            legal_name: "Studio Bela Ltda".to_string(),
            fantasy_name: Some("Studio Bela".to_string()),
            tax_document: "12345678000190".to_string(),
            email: "contato@studiobela.example".to_string(),
            phone: None,
            plan_id,
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

    fn sample_plan(plan_id: Uuid, permissions: PlanPermissions) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
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
        }
    }

    #[tokio::test]
    async fn evaluate_allows_healthy_company() {
        let company_id = Uuid::new_v4();
        let mut company_repo = MockCompanyRepository::new();
        let company = sample_company(company_id, None);

        company_repo
            .expect_find_by_id()
            .with(eq(company_id))
            .returning(move |_| {
                let company = company.clone();
                Box::pin(async move { Ok(company) })
            });

        let gate = AccessGateUseCase::new(Arc::new(company_repo));
        assert_eq!(gate.evaluate(company_id).await, GateState::Allowed);
    }

    #[tokio::test]
    async fn evaluate_blocks_when_fetch_fails() {
        let company_id = Uuid::new_v4();
        let mut company_repo = MockCompanyRepository::new();

        company_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection refused")) }));

        let gate = AccessGateUseCase::new(Arc::new(company_repo));
        assert_eq!(
            gate.evaluate(company_id).await,
            GateState::Blocked(BlockReason::StatusUnavailable)
        );
    }

    #[tokio::test]
    async fn evaluate_blocks_admin_flag_despite_enabled_plan() {
        let company_id = Uuid::new_v4();
        let mut company_repo = MockCompanyRepository::new();
        let mut company = sample_company(company_id, Some(Uuid::new_v4()));
        company.is_blocked = true;

        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let gate = AccessGateUseCase::new(Arc::new(company_repo));
        assert_eq!(
            gate.evaluate(company_id).await,
            GateState::Blocked(BlockReason::Administrative)
        );
    }

    #[tokio::test]
    async fn authorize_passes_enabled_feature() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut company_repo = MockCompanyRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        let company = sample_company(company_id, Some(plan_id));
        let plan = sample_plan(
            plan_id,
            PlanPermissions {
                clients: true,
                ..Default::default()
            },
        );

        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(plan) })
            });

        let guard = TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo));
        let (company, plan) = guard
            .authorize(company_id, FeatureKey::Clients)
            .await
            .unwrap();

        assert_eq!(company.id, company_id);
        assert_eq!(plan.unwrap().id, plan_id);
    }

    #[tokio::test]
    async fn authorize_denies_disabled_feature() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut company_repo = MockCompanyRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        let company = sample_company(company_id, Some(plan_id));
        let plan = sample_plan(
            plan_id,
            PlanPermissions {
                clients: true,
                ..Default::default()
            },
        );

        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });
        plan_repo.expect_find_by_id().returning(move |_| {
            let plan = plan.clone();
            Box::pin(async move { Ok(plan) })
        });

        let guard = TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo));
        let err = guard
            .authorize(company_id, FeatureKey::Financial)
            .await
            .unwrap_err();

        assert!(matches!(err, GuardError::PermissionDenied(_)));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn authorize_blocks_past_due_before_permissions() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut company_repo = MockCompanyRepository::new();
        let plan_repo = MockPlanRepository::new();

        let mut company = sample_company(company_id, Some(plan_id));
        company.subscription_status = SubscriptionStatus::PastDue.to_string();

        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let guard = TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo));
        let err = guard
            .authorize(company_id, FeatureKey::Dashboard)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Blocked(BlockReason::Billing(SubscriptionStatus::PastDue))
        ));
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn authorize_denies_gated_feature_without_plan() {
        let company_id = Uuid::new_v4();

        let mut company_repo = MockCompanyRepository::new();
        let plan_repo = MockPlanRepository::new();

        let company = sample_company(company_id, None);
        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        let guard = TenantGuard::new(Arc::new(company_repo), Arc::new(plan_repo));
        let err = guard
            .authorize(company_id, FeatureKey::Clients)
            .await
            .unwrap_err();

        assert!(matches!(err, GuardError::PermissionDenied(_)));
    }
}
