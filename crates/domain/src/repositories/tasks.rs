use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::tasks::{InsertTaskEntity, TaskEntity, UpdateTaskEntity};

#[async_trait]
#[automock]
pub trait TaskRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<TaskEntity>>;

    async fn find_by_id(&self, company_id: Uuid, task_id: Uuid) -> Result<Option<TaskEntity>>;

    async fn create(&self, insert_task: InsertTaskEntity) -> Result<Uuid>;

    async fn update(
        &self,
        company_id: Uuid,
        task_id: Uuid,
        update_task: UpdateTaskEntity,
    ) -> Result<()>;

    async fn soft_delete(&self, company_id: Uuid, task_id: Uuid) -> Result<()>;
}
