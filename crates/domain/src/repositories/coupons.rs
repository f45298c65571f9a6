use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::coupons::{CouponEntity, InsertCouponEntity, UpdateCouponEntity};

#[async_trait]
#[automock]
pub trait CouponRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<CouponEntity>>;

    async fn find_by_id(&self, company_id: Uuid, coupon_id: Uuid) -> Result<Option<CouponEntity>>;

    async fn find_by_code(&self, company_id: Uuid, code: &str) -> Result<Option<CouponEntity>>;

    async fn create(&self, insert_coupon: InsertCouponEntity) -> Result<Uuid>;

    async fn update(
        &self,
        company_id: Uuid,
        coupon_id: Uuid,
        update_coupon: UpdateCouponEntity,
    ) -> Result<()>;

    async fn delete(&self, company_id: Uuid, coupon_id: Uuid) -> Result<()>;

    async fn increment_used_count(&self, coupon_id: Uuid) -> Result<()>;
}
