use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::services::{InsertServiceEntity, ServiceEntity, UpdateServiceEntity},
    repositories::services::ServiceRepository,
    schema::services,
};

pub struct ServicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ServicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ServiceRepository for ServicePostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ServiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = services::table
            .filter(services::company_id.eq(company_id))
            .filter(services::deleted_at.is_null())
            .order(services::name.asc())
            .select(ServiceEntity::as_select())
            .load::<ServiceEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(
        &self,
        company_id: Uuid,
        service_id: Uuid,
    ) -> Result<Option<ServiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = services::table
            .filter(services::company_id.eq(company_id))
            .filter(services::id.eq(service_id))
            .filter(services::deleted_at.is_null())
            .select(ServiceEntity::as_select())
            .first::<ServiceEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_service: InsertServiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(services::table)
            .values(&insert_service)
            .returning(services::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        update_service: UpdateServiceEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(services::table)
            .filter(services::company_id.eq(company_id))
            .filter(services::id.eq(service_id))
            .filter(services::deleted_at.is_null())
            .set(&update_service)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn soft_delete(&self, company_id: Uuid, service_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(services::table)
            .filter(services::company_id.eq(company_id))
            .filter(services::id.eq(service_id))
            .filter(services::deleted_at.is_null())
            .set(services::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
