use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::plans::{InsertPlanEntity, UpdatePlanEntity},
    repositories::plans::PlanRepository,
    value_objects::plans::{InsertPlanModel, PlanDto, UpdatePlanModel},
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan not found")]
    NotFound,
    #[error("invalid plan: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlanError::NotFound => StatusCode::NOT_FOUND,
            PlanError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

/// Platform-admin plan catalog management plus the public listing shown on
/// the pricing page.
pub struct PlanUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
}

impl<P> PlanUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>) -> Self {
        Self { plan_repo }
    }

    pub async fn list_public(&self) -> PlanResult<Vec<PlanDto>> {
        let plans = self.plan_repo.list_active_plans().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list active plans");
            PlanError::Internal(err)
        })?;

        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    pub async fn list_all(&self) -> PlanResult<Vec<PlanDto>> {
        let plans = self.plan_repo.list_all_plans().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list plans");
            PlanError::Internal(err)
        })?;

        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    pub async fn create(&self, insert_plan: InsertPlanModel) -> PlanResult<Uuid> {
        validate_plan_numbers(
            insert_plan.price_minor,
            insert_plan.annual_price_minor,
            insert_plan.trial_days,
            insert_plan.max_professionals,
        )?;

        let now = Utc::now();
        let permissions = serde_json::to_value(&insert_plan.permissions)
            .map_err(|err| PlanError::Internal(err.into()))?;

        let plan_id = self
            .plan_repo
            .create(InsertPlanEntity {
                name: insert_plan.name,
                price_minor: insert_plan.price_minor,
                annual_price_minor: insert_plan.annual_price_minor,
                trial_days: insert_plan.trial_days,
                max_professionals: insert_plan.max_professionals,
                permissions,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to create plan");
                PlanError::Internal(err)
            })?;

        info!(%plan_id, "plans: plan created");
        Ok(plan_id)
    }

    pub async fn update(&self, plan_id: Uuid, update_plan: UpdatePlanModel) -> PlanResult<()> {
        validate_plan_numbers(
            update_plan.price_minor,
            update_plan.annual_price_minor,
            update_plan.trial_days,
            update_plan.max_professionals,
        )?;

        // Surface a 404 instead of silently updating zero rows.
        self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            warn!(%plan_id, db_error = ?err, "plans: plan not found for update");
            PlanError::NotFound
        })?;

        let permissions = serde_json::to_value(&update_plan.permissions)
            .map_err(|err| PlanError::Internal(err.into()))?;

        self.plan_repo
            .update(
                plan_id,
                UpdatePlanEntity {
                    name: update_plan.name,
                    price_minor: update_plan.price_minor,
                    annual_price_minor: update_plan.annual_price_minor,
                    trial_days: update_plan.trial_days,
                    max_professionals: update_plan.max_professionals,
                    permissions,
                    is_active: update_plan.is_active,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "plans: failed to update plan");
                PlanError::Internal(err)
            })?;

        info!(%plan_id, "plans: plan updated");
        Ok(())
    }

    /// Plans referenced by companies are never hard-deleted; delete means
    /// deactivate.
    pub async fn deactivate(&self, plan_id: Uuid) -> PlanResult<()> {
        self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            warn!(%plan_id, db_error = ?err, "plans: plan not found for deactivation");
            PlanError::NotFound
        })?;

        self.plan_repo.deactivate(plan_id).await.map_err(|err| {
            error!(%plan_id, db_error = ?err, "plans: failed to deactivate plan");
            PlanError::Internal(err)
        })?;

        info!(%plan_id, "plans: plan deactivated");
        Ok(())
    }
}

fn validate_plan_numbers(
    price_minor: i32,
    annual_price_minor: Option<i32>,
    trial_days: i32,
    max_professionals: i32,
) -> PlanResult<()> {
    if price_minor < 0 {
        return Err(PlanError::Validation("price must not be negative".into()));
    }
    if annual_price_minor.is_some_and(|price| price < 0) {
        return Err(PlanError::Validation(
            "annual price must not be negative".into(),
        ));
    }
    if trial_days < 0 {
        return Err(PlanError::Validation(
            "trial days must not be negative".into(),
        ));
    }
    if max_professionals < 0 {
        return Err(PlanError::Validation(
            "professional limit must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entities::plans::PlanEntity;
    use domain::repositories::plans::MockPlanRepository;
    use domain::value_objects::plans::PlanPermissions;

    fn sample_plan(plan_id: Uuid, is_active: bool) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: plan_id,
            name: "Essencial".to_string(),
            price_minor: 9_900,
            annual_price_minor: None,
            trial_days: 7,
            max_professionals: 3,
            permissions: PlanPermissions::default(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_public_maps_active_plans() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_list_active_plans().returning(|| {
            Box::pin(async { Ok(vec![sample_plan(Uuid::new_v4(), true)]) })
        });

        let usecase = PlanUseCase::new(Arc::new(plan_repo));
        let plans = usecase.list_public().await.unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Essencial");
    }

    #[tokio::test]
    async fn create_rejects_negative_price() {
        let usecase = PlanUseCase::new(Arc::new(MockPlanRepository::new()));

        let err = usecase
            .create(InsertPlanModel {
                name: "Broken".to_string(),
                price_minor: -1,
                annual_price_minor: None,
                trial_days: 0,
                max_professionals: 1,
                permissions: PlanPermissions::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlanError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn update_missing_plan_is_not_found() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("no rows")) }));

        let usecase = PlanUseCase::new(Arc::new(plan_repo));
        let err = usecase
            .update(
                Uuid::new_v4(),
                UpdatePlanModel {
                    name: "Essencial".to_string(),
                    price_minor: 9_900,
                    annual_price_minor: None,
                    trial_days: 7,
                    max_professionals: 3,
                    permissions: PlanPermissions::default(),
                    is_active: true,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PlanError::NotFound));
    }
}
