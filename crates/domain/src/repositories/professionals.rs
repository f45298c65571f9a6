use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::professionals::{
    InsertProfessionalEntity, ProfessionalEntity, UpdateProfessionalEntity,
};

#[async_trait]
#[automock]
pub trait ProfessionalRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<ProfessionalEntity>>;

    async fn find_by_id(
        &self,
        company_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<ProfessionalEntity>>;

    /// Live headcount counted against the plan limit.
    async fn count_active(&self, company_id: Uuid) -> Result<i64>;

    async fn create(&self, insert_professional: InsertProfessionalEntity) -> Result<Uuid>;

    async fn update(
        &self,
        company_id: Uuid,
        professional_id: Uuid,
        update_professional: UpdateProfessionalEntity,
    ) -> Result<()>;

    async fn soft_delete(&self, company_id: Uuid, professional_id: Uuid) -> Result<()>;
}
