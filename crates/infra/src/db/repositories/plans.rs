use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::plans::{InsertPlanEntity, PlanEntity, PlanRow, UpdatePlanEntity},
    repositories::plans::PlanRepository,
    schema::plans,
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<PlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = plans::table
            .filter(plans::id.eq(plan_id))
            .select(PlanRow::as_select())
            .first::<PlanRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn list_active_plans(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plans::table
            .filter(plans::is_active.eq(true))
            .order(plans::price_minor.asc())
            .select(PlanRow::as_select())
            .load::<PlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(PlanEntity::from).collect())
    }

    async fn list_all_plans(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plans::table
            .order(plans::price_minor.asc())
            .select(PlanRow::as_select())
            .load::<PlanRow>(&mut conn)?;

        Ok(rows.into_iter().map(PlanEntity::from).collect())
    }

    async fn create(&self, insert_plan: InsertPlanEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(plans::table)
            .values(&insert_plan)
            .returning(plans::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(&self, plan_id: Uuid, update_plan: UpdatePlanEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(plans::table)
            .filter(plans::id.eq(plan_id))
            .set(&update_plan)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn deactivate(&self, plan_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(plans::table)
            .filter(plans::id.eq(plan_id))
            .set(plans::is_active.eq(false))
            .execute(&mut conn)?;

        Ok(())
    }
}
