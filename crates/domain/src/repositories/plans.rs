use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<PlanEntity>;

    async fn list_active_plans(&self) -> Result<Vec<PlanEntity>>;

    async fn list_all_plans(&self) -> Result<Vec<PlanEntity>>;

    async fn create(&self, insert_plan: InsertPlanEntity) -> Result<Uuid>;

    async fn update(&self, plan_id: Uuid, update_plan: UpdatePlanEntity) -> Result<()>;

    async fn deactivate(&self, plan_id: Uuid) -> Result<()>;
}
