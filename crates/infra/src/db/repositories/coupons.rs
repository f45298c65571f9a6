use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::coupons::{CouponEntity, InsertCouponEntity, UpdateCouponEntity},
    repositories::coupons::CouponRepository,
    schema::coupons,
};

pub struct CouponPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CouponPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CouponRepository for CouponPostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<CouponEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = coupons::table
            .filter(coupons::company_id.eq(company_id))
            .order(coupons::created_at.desc())
            .select(CouponEntity::as_select())
            .load::<CouponEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, company_id: Uuid, coupon_id: Uuid) -> Result<Option<CouponEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = coupons::table
            .filter(coupons::company_id.eq(company_id))
            .filter(coupons::id.eq(coupon_id))
            .select(CouponEntity::as_select())
            .first::<CouponEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_code(&self, company_id: Uuid, code: &str) -> Result<Option<CouponEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = coupons::table
            .filter(coupons::company_id.eq(company_id))
            .filter(coupons::code.eq(code))
            .select(CouponEntity::as_select())
            .first::<CouponEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_coupon: InsertCouponEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(coupons::table)
            .values(&insert_coupon)
            .returning(coupons::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        company_id: Uuid,
        coupon_id: Uuid,
        update_coupon: UpdateCouponEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(coupons::table)
            .filter(coupons::company_id.eq(company_id))
            .filter(coupons::id.eq(coupon_id))
            .set(&update_coupon)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete(&self, company_id: Uuid, coupon_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(coupons::table)
            .filter(coupons::company_id.eq(company_id))
            .filter(coupons::id.eq(coupon_id))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn increment_used_count(&self, coupon_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(coupons::table)
            .filter(coupons::id.eq(coupon_id))
            .set(coupons::used_count.eq(coupons::used_count + 1))
            .execute(&mut conn)?;

        Ok(())
    }
}
