use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity},
    repositories::clients::ClientRepository,
    schema::clients,
};

pub struct ClientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = clients::table
            .filter(clients::company_id.eq(company_id))
            .filter(clients::deleted_at.is_null())
            .order(clients::name.asc())
            .select(ClientEntity::as_select())
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, company_id: Uuid, client_id: Uuid) -> Result<Option<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = clients::table
            .filter(clients::company_id.eq(company_id))
            .filter(clients::id.eq(client_id))
            .filter(clients::deleted_at.is_null())
            .select(ClientEntity::as_select())
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_client: InsertClientEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(clients::table)
            .values(&insert_client)
            .returning(clients::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        company_id: Uuid,
        client_id: Uuid,
        update_client: UpdateClientEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(clients::table)
            .filter(clients::company_id.eq(company_id))
            .filter(clients::id.eq(client_id))
            .filter(clients::deleted_at.is_null())
            .set(&update_client)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn soft_delete(&self, company_id: Uuid, client_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(clients::table)
            .filter(clients::company_id.eq(company_id))
            .filter(clients::id.eq(client_id))
            .filter(clients::deleted_at.is_null())
            .set(clients::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
