use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::services::{InsertServiceEntity, ServiceEntity, UpdateServiceEntity};

#[async_trait]
#[automock]
pub trait ServiceRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ServiceEntity>>;

    async fn find_by_id(&self, company_id: Uuid, service_id: Uuid)
    -> Result<Option<ServiceEntity>>;

    async fn create(&self, insert_service: InsertServiceEntity) -> Result<Uuid>;

    async fn update(
        &self,
        company_id: Uuid,
        service_id: Uuid,
        update_service: UpdateServiceEntity,
    ) -> Result<()>;

    async fn soft_delete(&self, company_id: Uuid, service_id: Uuid) -> Result<()>;
}
