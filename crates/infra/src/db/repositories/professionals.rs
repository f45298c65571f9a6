use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::professionals::{
        InsertProfessionalEntity, ProfessionalEntity, UpdateProfessionalEntity,
    },
    repositories::professionals::ProfessionalRepository,
    schema::professionals,
};

pub struct ProfessionalPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ProfessionalPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProfessionalRepository for ProfessionalPostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ProfessionalEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = professionals::table
            .filter(professionals::company_id.eq(company_id))
            .filter(professionals::deleted_at.is_null())
            .order(professionals::name.asc())
            .select(ProfessionalEntity::as_select())
            .load::<ProfessionalEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(
        &self,
        company_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<ProfessionalEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = professionals::table
            .filter(professionals::company_id.eq(company_id))
            .filter(professionals::id.eq(professional_id))
            .filter(professionals::deleted_at.is_null())
            .select(ProfessionalEntity::as_select())
            .first::<ProfessionalEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn count_active(&self, company_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = professionals::table
            .filter(professionals::company_id.eq(company_id))
            .filter(professionals::deleted_at.is_null())
            .filter(professionals::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn create(&self, insert_professional: InsertProfessionalEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(professionals::table)
            .values(&insert_professional)
            .returning(professionals::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        company_id: Uuid,
        professional_id: Uuid,
        update_professional: UpdateProfessionalEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(professionals::table)
            .filter(professionals::company_id.eq(company_id))
            .filter(professionals::id.eq(professional_id))
            .filter(professionals::deleted_at.is_null())
            .set(&update_professional)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn soft_delete(&self, company_id: Uuid, professional_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(professionals::table)
            .filter(professionals::company_id.eq(company_id))
            .filter(professionals::id.eq(professional_id))
            .filter(professionals::deleted_at.is_null())
            .set(professionals::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
