use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::support_tickets::{InsertSupportTicketEntity, SupportTicketEntity};
use crate::value_objects::enums::ticket_statuses::{TicketPriority, TicketStatus};

#[async_trait]
#[automock]
pub trait SupportTicketRepository {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<SupportTicketEntity>>;

    async fn find_by_id(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Option<SupportTicketEntity>>;

    async fn create(&self, insert_ticket: InsertSupportTicketEntity) -> Result<Uuid>;

    async fn update_status(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
        status: TicketStatus,
        priority: TicketPriority,
    ) -> Result<()>;

    async fn soft_delete(&self, company_id: Uuid, ticket_id: Uuid) -> Result<()>;
}
