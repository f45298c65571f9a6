use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::tasks::{InsertTaskEntity, TaskEntity, UpdateTaskEntity},
    repositories::tasks::TaskRepository,
    schema::tasks,
};

pub struct TaskPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TaskPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TaskRepository for TaskPostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<TaskEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = tasks::table
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::deleted_at.is_null())
            .order(tasks::created_at.desc())
            .select(TaskEntity::as_select())
            .load::<TaskEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, company_id: Uuid, task_id: Uuid) -> Result<Option<TaskEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = tasks::table
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::id.eq(task_id))
            .filter(tasks::deleted_at.is_null())
            .select(TaskEntity::as_select())
            .first::<TaskEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_task: InsertTaskEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(tasks::table)
            .values(&insert_task)
            .returning(tasks::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        company_id: Uuid,
        task_id: Uuid,
        update_task: UpdateTaskEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::id.eq(task_id))
            .filter(tasks::deleted_at.is_null())
            .set(&update_task)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn soft_delete(&self, company_id: Uuid, task_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::id.eq(task_id))
            .filter(tasks::deleted_at.is_null())
            .set(tasks::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
