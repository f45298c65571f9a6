use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::companies::{CompanyEntity, InsertCompanyEntity},
    repositories::companies::CompanyRepository,
    schema::companies,
    value_objects::companies::BillingStatusUpdate,
};

pub struct CompanyPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CompanyPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CompanyRepository for CompanyPostgres {
    async fn find_by_id(&self, company_id: Uuid) -> Result<CompanyEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = companies::table
            .filter(companies::id.eq(company_id))
            .select(CompanyEntity::as_select())
            .first::<CompanyEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_asaas_subscription_id(
        &self,
        asaas_subscription_id: &str,
    ) -> Result<Option<CompanyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = companies::table
            .filter(companies::asaas_subscription_id.eq(asaas_subscription_id))
            .select(CompanyEntity::as_select())
            .first::<CompanyEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list(&self) -> Result<Vec<CompanyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = companies::table
            .order(companies::created_at.desc())
            .select(CompanyEntity::as_select())
            .load::<CompanyEntity>(&mut conn)?;

        Ok(results)
    }

    async fn register(&self, insert_company: InsertCompanyEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(companies::table)
            .values(&insert_company)
            .returning(companies::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update_status(
        &self,
        company_id: Uuid,
        is_active: bool,
        is_blocked: bool,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(companies::table)
            .filter(companies::id.eq(company_id))
            .set((
                companies::is_active.eq(is_active),
                companies::is_blocked.eq(is_blocked),
                companies::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn assign_plan(&self, company_id: Uuid, plan_id: Option<Uuid>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(companies::table)
            .filter(companies::id.eq(company_id))
            .set((
                companies::plan_id.eq(plan_id),
                companies::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn update_billing_status(
        &self,
        company_id: Uuid,
        billing_update: BillingStatusUpdate,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(companies::table)
            .filter(companies::id.eq(company_id))
            .set((
                companies::subscription_status.eq(billing_update.status.to_string()),
                companies::next_due_date.eq(billing_update.next_due_date),
                companies::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn link_asaas_subscription(
        &self,
        company_id: Uuid,
        asaas_subscription_id: &str,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(companies::table)
            .filter(companies::id.eq(company_id))
            .set((
                companies::asaas_subscription_id.eq(asaas_subscription_id),
                companies::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
