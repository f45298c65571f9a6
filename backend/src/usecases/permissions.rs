use std::sync::Arc;

use anyhow::Result as AnyResult;
use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use domain::{
    entities::plans::PlanEntity,
    repositories::{
        companies::CompanyRepository, plans::PlanRepository,
        professionals::ProfessionalRepository,
    },
    value_objects::{
        companies::CompanyPermissionsDto,
        enums::feature_keys::FeatureKey,
        plans::{ProfessionalsLimitInfo, resolve_permission, resolved_permission_map},
    },
};

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl PermissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PermissionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PermissionResult<T> = std::result::Result<T, PermissionError>;

/// Resolves the effective feature permissions for a tenant from its assigned
/// plan. Every lookup is fail-closed: no plan, missing flag or unknown key
/// all read as denied.
pub struct PermissionUseCase<C, P, Pr>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: ProfessionalRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    plan_repo: Arc<P>,
    professional_repo: Arc<Pr>,
}

impl<C, P, Pr> PermissionUseCase<C, P, Pr>
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: ProfessionalRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, plan_repo: Arc<P>, professional_repo: Arc<Pr>) -> Self {
        Self {
            company_repo,
            plan_repo,
            professional_repo,
        }
    }

    async fn effective_plan(&self, company_id: Uuid) -> AnyResult<Option<PlanEntity>> {
        let company = self.company_repo.find_by_id(company_id).await?;

        let Some(plan_id) = company.plan_id else {
            debug!(%company_id, "permissions: company has no plan assigned");
            return Ok(None);
        };

        let plan = self.plan_repo.find_by_id(plan_id).await?;
        Ok(Some(plan))
    }

    pub async fn has_permission(
        &self,
        company_id: Uuid,
        key: FeatureKey,
    ) -> PermissionResult<bool> {
        let plan = self.effective_plan(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "permissions: failed to resolve plan"
            );
            PermissionError::Internal(err)
        })?;

        Ok(resolve_permission(plan.as_ref().map(|p| &p.permissions), key))
    }

    pub async fn professionals_limit_info(
        &self,
        company_id: Uuid,
    ) -> PermissionResult<Option<ProfessionalsLimitInfo>> {
        let Some(plan) = self.effective_plan(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "permissions: failed to resolve plan for limit info"
            );
            PermissionError::Internal(err)
        })?
        else {
            return Ok(None);
        };

        let current = self
            .professional_repo
            .count_active(company_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "permissions: failed to count professionals"
                );
                PermissionError::Internal(err)
            })?;

        Ok(Some(ProfessionalsLimitInfo {
            limit: plan.max_professionals,
            current,
        }))
    }

    pub async fn can_add_professional(&self, company_id: Uuid) -> PermissionResult<bool> {
        let limit_info = self.professionals_limit_info(company_id).await?;
        Ok(limit_info.map(|info| info.can_add()).unwrap_or(false))
    }

    /// Everything the navigation needs in one call: the full resolved map
    /// plus the professional-headcount limit.
    pub async fn company_permissions(
        &self,
        company_id: Uuid,
    ) -> PermissionResult<CompanyPermissionsDto> {
        let plan = self.effective_plan(company_id).await.map_err(|err| {
            error!(
                %company_id,
                db_error = ?err,
                "permissions: failed to resolve plan for permission map"
            );
            PermissionError::Internal(err)
        })?;

        let permissions = resolved_permission_map(plan.as_ref().map(|p| &p.permissions));

        let professionals_limit = match &plan {
            Some(plan) => {
                let current = self
                    .professional_repo
                    .count_active(company_id)
                    .await
                    .map_err(|err| {
                        error!(
                            %company_id,
                            db_error = ?err,
                            "permissions: failed to count professionals"
                        );
                        PermissionError::Internal(err)
                    })?;
                Some(ProfessionalsLimitInfo {
                    limit: plan.max_professionals,
                    current,
                })
            }
            None => None,
        };

        let can_add_professional = professionals_limit
            .map(|info| info.can_add())
            .unwrap_or(false);

        Ok(CompanyPermissionsDto {
            permissions,
            professionals_limit,
            can_add_professional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::companies::CompanyEntity,
        repositories::{
            companies::MockCompanyRepository, plans::MockPlanRepository,
            professionals::MockProfessionalRepository,
        },
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus, plans::PlanPermissions,
        },
    };
    use mockall::predicate::eq;

    fn sample_company(company_id: Uuid, plan_id: Option<Uuid>) -> CompanyEntity {
        let now = Utc::now();
        CompanyEntity {
            id: company_id,
            legal_name: "Clinica Viva Ltda".to_string(),
            fantasy_name: None,
            tax_document: "98765432000101".to_string(),
            email: "adm@clinicaviva.example".to_string(),
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

    fn sample_plan(plan_id: Uuid, permissions: PlanPermissions, max_professionals: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: plan_id,
            name: "Profissional".to_string(),
            price_minor: 14_900,
            annual_price_minor: Some(149_000),
            trial_days: 14,
            max_professionals,
            permissions,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase_with(
        company: CompanyEntity,
        plan: Option<PlanEntity>,
        professional_count: i64,
    ) -> PermissionUseCase<MockCompanyRepository, MockPlanRepository, MockProfessionalRepository>
    {
        let mut company_repo = MockCompanyRepository::new();
        let mut plan_repo = MockPlanRepository::new();
        let mut professional_repo = MockProfessionalRepository::new();

        company_repo.expect_find_by_id().returning(move |_| {
            let company = company.clone();
            Box::pin(async move { Ok(company) })
        });

        if let Some(plan) = plan {
            plan_repo
                .expect_find_by_id()
                .with(eq(plan.id))
                .returning(move |_| {
                    let plan = plan.clone();
                    Box::pin(async move { Ok(plan) })
                });
        }

        professional_repo
            .expect_count_active()
            .returning(move |_| Box::pin(async move { Ok(professional_count) }));

        PermissionUseCase::new(
            Arc::new(company_repo),
            Arc::new(plan_repo),
            Arc::new(professional_repo),
        )
    }

    #[tokio::test]
    async fn missing_map_keys_resolve_to_denied() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let permissions: PlanPermissions =
            serde_json::from_value(serde_json::json!({ "clients": true })).unwrap();

        let usecase = usecase_with(
            sample_company(company_id, Some(plan_id)),
            Some(sample_plan(plan_id, permissions, 3)),
            0,
        );

        assert!(
            usecase
                .has_permission(company_id, FeatureKey::Clients)
                .await
                .unwrap()
        );
        assert!(
            !usecase
                .has_permission(company_id, FeatureKey::Financial)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn company_without_plan_gets_only_always_visible() {
        let company_id = Uuid::new_v4();
        let usecase = usecase_with(sample_company(company_id, None), None, 0);

        for key in FeatureKey::ALL {
            let granted = usecase.has_permission(company_id, key).await.unwrap();
            assert_eq!(granted, key.is_always_visible(), "key {}", key);
        }
    }

    #[tokio::test]
    async fn limit_blocks_at_capacity_and_allows_below() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let plan = sample_plan(plan_id, PlanPermissions::default(), 3);

        let at_capacity = usecase_with(
            sample_company(company_id, Some(plan_id)),
            Some(plan.clone()),
            3,
        );
        assert!(!at_capacity.can_add_professional(company_id).await.unwrap());

        let below_capacity =
            usecase_with(sample_company(company_id, Some(plan_id)), Some(plan), 2);
        assert!(
            below_capacity
                .can_add_professional(company_id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn no_plan_means_no_limit_info_and_no_headroom() {
        let company_id = Uuid::new_v4();
        let usecase = usecase_with(sample_company(company_id, None), None, 0);

        assert!(
            usecase
                .professionals_limit_info(company_id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!usecase.can_add_professional(company_id).await.unwrap());
    }

    #[tokio::test]
    async fn permission_map_shows_granted_and_denied_entries() {
        let company_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let permissions = PlanPermissions {
            clients: true,
            financial: false,
            ..Default::default()
        };

        let usecase = usecase_with(
            sample_company(company_id, Some(plan_id)),
            Some(sample_plan(plan_id, permissions, 5)),
            1,
        );

        let dto = usecase.company_permissions(company_id).await.unwrap();

        assert_eq!(dto.permissions.get("clients"), Some(&true));
        assert_eq!(dto.permissions.get("financial"), Some(&false));
        assert_eq!(dto.permissions.get("support"), Some(&true));
        let limit = dto.professionals_limit.unwrap();
        assert_eq!(limit.limit, 5);
        assert_eq!(limit.current, 1);
        assert!(dto.can_add_professional);
    }
}
