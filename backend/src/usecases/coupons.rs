use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::access_gate::{GuardError, TenantGuard};
use domain::{
    entities::coupons::{InsertCouponEntity, UpdateCouponEntity},
    repositories::{
        companies::CompanyRepository, coupons::CouponRepository, plans::PlanRepository,
    },
    value_objects::{
        coupons::{
            CouponDto, CouponEvaluation, CouponValidity, EvaluateCouponRequest,
            InsertCouponModel, UpdateCouponModel, evaluate_coupon,
        },
        enums::{discount_types::DiscountType, feature_keys::FeatureKey},
    },
};

#[derive(Debug, Error)]
pub enum CouponError {
    #[error("coupon not found")]
    NotFound,
    #[error("coupon code already exists")]
    DuplicateCode,
    #[error("coupon is not redeemable: {0:?}")]
    NotRedeemable(CouponValidity),
    #[error("invalid coupon data: {0}")]
    Validation(String),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl CouponError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CouponError::NotFound => StatusCode::NOT_FOUND,
            CouponError::DuplicateCode => StatusCode::CONFLICT,
            CouponError::NotRedeemable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CouponError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CouponError::Guard(guard_error) => guard_error.status_code(),
            CouponError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CouponResult<T> = std::result::Result<T, CouponError>;

/// Tenant coupon management plus the validity/discount evaluation used at
/// checkout.
pub struct CouponUseCase<Cp, C, P>
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    coupon_repo: Arc<Cp>,
    guard: TenantGuard<C, P>,
}

impl<Cp, C, P> CouponUseCase<Cp, C, P>
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(coupon_repo: Arc<Cp>, guard: TenantGuard<C, P>) -> Self {
        Self { coupon_repo, guard }
    }

    pub async fn list(&self, company_id: Uuid) -> CouponResult<Vec<CouponDto>> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        let coupons = self
            .coupon_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "coupons: failed to list coupons");
                CouponError::Internal(err)
            })?;

        let now = Utc::now();
        Ok(coupons
            .into_iter()
            .map(|coupon| CouponDto::from_entity(coupon, now))
            .collect())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        insert_coupon: InsertCouponModel,
    ) -> CouponResult<Uuid> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        let code = insert_coupon.code.trim().to_uppercase();
        validate_coupon_numbers(
            insert_coupon.discount_type,
            insert_coupon.discount_value,
            &code,
        )?;

        let existing = self
            .coupon_repo
            .find_by_code(company_id, &code)
            .await
            .map_err(CouponError::Internal)?;
        if existing.is_some() {
            warn!(%company_id, code, "coupons: duplicate code rejected");
            return Err(CouponError::DuplicateCode);
        }

        let now = Utc::now();
        let coupon_id = self
            .coupon_repo
            .create(InsertCouponEntity {
                company_id,
                code: code.clone(),
                discount_type: insert_coupon.discount_type.to_string(),
                discount_value: insert_coupon.discount_value,
                min_order_minor: insert_coupon.min_order_minor,
                max_discount_minor: insert_coupon.max_discount_minor,
                usage_limit: insert_coupon.usage_limit,
                used_count: 0,
                valid_until: insert_coupon.valid_until,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "coupons: failed to create coupon");
                CouponError::Internal(err)
            })?;

        info!(%company_id, %coupon_id, code, "coupons: coupon created");
        Ok(coupon_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        coupon_id: Uuid,
        update_coupon: UpdateCouponModel,
    ) -> CouponResult<()> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        let existing = self
            .coupon_repo
            .find_by_id(company_id, coupon_id)
            .await
            .map_err(CouponError::Internal)?
            .ok_or(CouponError::NotFound)?;

        validate_coupon_numbers(
            update_coupon.discount_type,
            update_coupon.discount_value,
            &existing.code,
        )?;

        self.coupon_repo
            .update(
                company_id,
                coupon_id,
                UpdateCouponEntity {
                    discount_type: update_coupon.discount_type.to_string(),
                    discount_value: update_coupon.discount_value,
                    min_order_minor: update_coupon.min_order_minor,
                    max_discount_minor: update_coupon.max_discount_minor,
                    usage_limit: update_coupon.usage_limit,
                    valid_until: update_coupon.valid_until,
                    is_active: update_coupon.is_active,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %coupon_id,
                    db_error = ?err,
                    "coupons: failed to update coupon"
                );
                CouponError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, coupon_id: Uuid) -> CouponResult<()> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        self.coupon_repo
            .find_by_id(company_id, coupon_id)
            .await
            .map_err(CouponError::Internal)?
            .ok_or(CouponError::NotFound)?;

        self.coupon_repo
            .delete(company_id, coupon_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %coupon_id,
                    db_error = ?err,
                    "coupons: failed to delete coupon"
                );
                CouponError::Internal(err)
            })?;

        info!(%company_id, %coupon_id, "coupons: coupon deleted");
        Ok(())
    }

    /// Read-only check used while the operator types a code into an order.
    pub async fn evaluate(
        &self,
        company_id: Uuid,
        request: EvaluateCouponRequest,
    ) -> CouponResult<CouponEvaluation> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        let code = request.code.trim().to_uppercase();
        let coupon = self
            .coupon_repo
            .find_by_code(company_id, &code)
            .await
            .map_err(CouponError::Internal)?
            .ok_or(CouponError::NotFound)?;

        Ok(evaluate_coupon(&coupon, Utc::now(), request.subtotal_minor))
    }

    /// Consumes one use of a valid coupon. The usage counter only moves on a
    /// fully valid evaluation.
    pub async fn redeem(
        &self,
        company_id: Uuid,
        request: EvaluateCouponRequest,
    ) -> CouponResult<CouponEvaluation> {
        self.guard.authorize(company_id, FeatureKey::Coupons).await?;

        let code = request.code.trim().to_uppercase();
        let coupon = self
            .coupon_repo
            .find_by_code(company_id, &code)
            .await
            .map_err(CouponError::Internal)?
            .ok_or(CouponError::NotFound)?;

        let evaluation = evaluate_coupon(&coupon, Utc::now(), request.subtotal_minor);
        if evaluation.status != CouponValidity::Valid {
            warn!(
                %company_id,
                code,
                status = ?evaluation.status,
                "coupons: redeem rejected"
            );
            return Err(CouponError::NotRedeemable(evaluation.status));
        }

        self.coupon_repo
            .increment_used_count(coupon.id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    coupon_id = %coupon.id,
                    db_error = ?err,
                    "coupons: failed to record coupon use"
                );
                CouponError::Internal(err)
            })?;

        info!(%company_id, code, "coupons: coupon redeemed");
        Ok(evaluation)
    }
}

fn validate_coupon_numbers(
    discount_type: DiscountType,
    discount_value: i64,
    code: &str,
) -> CouponResult<()> {
    if code.is_empty() {
        return Err(CouponError::Validation("code is required".into()));
    }
    if discount_value <= 0 {
        return Err(CouponError::Validation(
            "discount value must be positive".into(),
        ));
    }
    if discount_type == DiscountType::Percentage && discount_value > 100 {
        return Err(CouponError::Validation(
            "percentage discount cannot exceed 100".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::entities::{companies::CompanyEntity, coupons::CouponEntity, plans::PlanEntity};
    use domain::repositories::{
        companies::MockCompanyRepository, coupons::MockCouponRepository,
        plans::MockPlanRepository,
    };
    use domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
    use domain::value_objects::plans::PlanPermissions;

    fn guard_with_coupons() -> TenantGuard<MockCompanyRepository, MockPlanRepository> {
        let plan_id = Uuid::new_v4();
        let now = Utc::now();

        let company = CompanyEntity {
            id: Uuid::new_v4(),
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
            name: "Profissional".to_string(),
            price_minor: 14_900,
            annual_price_minor: None,
            trial_days: 14,
            max_professionals: 10,
            permissions: PlanPermissions {
                coupons: true,
                ..Default::default()
            },
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

    fn sample_coupon(code: &str) -> CouponEntity {
        let now = Utc::now();
        CouponEntity {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            code: code.to_string(),
            discount_type: DiscountType::Fixed.to_string(),
            discount_value: 1_000,
            min_order_minor: None,
            max_discount_minor: None,
            usage_limit: Some(5),
            used_count: 0,
            valid_until: now + Duration::days(10),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code() {
        let mut coupon_repo = MockCouponRepository::new();
        coupon_repo.expect_find_by_code().returning(|_, _| {
            Box::pin(async { Ok(Some(sample_coupon("WELCOME10"))) })
        });

        let usecase = CouponUseCase::new(Arc::new(coupon_repo), guard_with_coupons());

        let err = usecase
            .create(
                Uuid::new_v4(),
                InsertCouponModel {
                    code: "welcome10".to_string(),
                    discount_type: DiscountType::Fixed,
                    discount_value: 1_000,
                    min_order_minor: None,
                    max_discount_minor: None,
                    usage_limit: None,
                    valid_until: Utc::now() + Duration::days(30),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CouponError::DuplicateCode));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn create_rejects_percentage_above_hundred() {
        let usecase =
            CouponUseCase::new(Arc::new(MockCouponRepository::new()), guard_with_coupons());

        let err = usecase
            .create(
                Uuid::new_v4(),
                InsertCouponModel {
                    code: "TOOMUCH".to_string(),
                    discount_type: DiscountType::Percentage,
                    discount_value: 150,
                    min_order_minor: None,
                    max_discount_minor: None,
                    usage_limit: None,
                    valid_until: Utc::now() + Duration::days(30),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CouponError::Validation(_)));
    }

    #[tokio::test]
    async fn redeem_increments_usage_only_when_valid() {
        let mut coupon_repo = MockCouponRepository::new();
        coupon_repo
            .expect_find_by_code()
            .returning(|_, _| Box::pin(async { Ok(Some(sample_coupon("WELCOME10"))) }));
        coupon_repo
            .expect_increment_used_count()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = CouponUseCase::new(Arc::new(coupon_repo), guard_with_coupons());

        let evaluation = usecase
            .redeem(
                Uuid::new_v4(),
                EvaluateCouponRequest {
                    code: "WELCOME10".to_string(),
                    subtotal_minor: Some(5_000),
                },
            )
            .await
            .unwrap();

        assert_eq!(evaluation.status, CouponValidity::Valid);
        assert_eq!(evaluation.discount_minor, Some(1_000));
    }

    #[tokio::test]
    async fn redeem_rejects_exhausted_coupon_without_counting() {
        let mut coupon_repo = MockCouponRepository::new();
        coupon_repo.expect_find_by_code().returning(|_, _| {
            Box::pin(async {
                let mut coupon = sample_coupon("WELCOME10");
                coupon.usage_limit = Some(1);
                coupon.used_count = 1;
                Ok(Some(coupon))
            })
        });

        let usecase = CouponUseCase::new(Arc::new(coupon_repo), guard_with_coupons());

        let err = usecase
            .redeem(
                Uuid::new_v4(),
                EvaluateCouponRequest {
                    code: "WELCOME10".to_string(),
                    subtotal_minor: Some(5_000),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CouponError::NotRedeemable(CouponValidity::Exhausted)
        ));
    }

    #[tokio::test]
    async fn evaluate_unknown_code_is_not_found() {
        let mut coupon_repo = MockCouponRepository::new();
        coupon_repo
            .expect_find_by_code()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = CouponUseCase::new(Arc::new(coupon_repo), guard_with_coupons());

        let err = usecase
            .evaluate(
                Uuid::new_v4(),
                EvaluateCouponRequest {
                    code: "GHOST".to_string(),
                    subtotal_minor: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CouponError::NotFound));
    }
}
