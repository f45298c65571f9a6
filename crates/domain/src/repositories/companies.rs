use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::companies::{CompanyEntity, InsertCompanyEntity};
use crate::value_objects::companies::BillingStatusUpdate;

#[async_trait]
#[automock]
pub trait CompanyRepository {
    async fn find_by_id(&self, company_id: Uuid) -> Result<CompanyEntity>;

    async fn find_by_asaas_subscription_id(
        &self,
        asaas_subscription_id: &str,
    ) -> Result<Option<CompanyEntity>>;

    async fn list(&self) -> Result<Vec<CompanyEntity>>;

    async fn register(&self, insert_company: InsertCompanyEntity) -> Result<Uuid>;

    async fn update_status(
        &self,
        company_id: Uuid,
        is_active: bool,
        is_blocked: bool,
    ) -> Result<()>;

    async fn assign_plan(&self, company_id: Uuid, plan_id: Option<Uuid>) -> Result<()>;

    async fn update_billing_status(
        &self,
        company_id: Uuid,
        update: BillingStatusUpdate,
    ) -> Result<()>;

    async fn link_asaas_subscription(
        &self,
        company_id: Uuid,
        asaas_subscription_id: &str,
    ) -> Result<()>;
}
