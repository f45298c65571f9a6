use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity};

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ClientEntity>>;

    async fn find_by_id(&self, company_id: Uuid, client_id: Uuid) -> Result<Option<ClientEntity>>;

    async fn create(&self, insert_client: InsertClientEntity) -> Result<Uuid>;

    async fn update(
        &self,
        company_id: Uuid,
        client_id: Uuid,
        update_client: UpdateClientEntity,
    ) -> Result<()>;

    async fn soft_delete(&self, company_id: Uuid, client_id: Uuid) -> Result<()>;
}
