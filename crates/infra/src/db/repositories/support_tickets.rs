use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::support_tickets::{InsertSupportTicketEntity, SupportTicketEntity},
    repositories::support_tickets::SupportTicketRepository,
    schema::support_tickets,
    value_objects::enums::ticket_statuses::{TicketPriority, TicketStatus},
};

pub struct SupportTicketPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SupportTicketPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SupportTicketRepository for SupportTicketPostgres {
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<SupportTicketEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = support_tickets::table
            .filter(support_tickets::company_id.eq(company_id))
            .filter(support_tickets::deleted_at.is_null())
            .order(support_tickets::created_at.desc())
            .select(SupportTicketEntity::as_select())
            .load::<SupportTicketEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Option<SupportTicketEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = support_tickets::table
            .filter(support_tickets::company_id.eq(company_id))
            .filter(support_tickets::id.eq(ticket_id))
            .filter(support_tickets::deleted_at.is_null())
            .select(SupportTicketEntity::as_select())
            .first::<SupportTicketEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_ticket: InsertSupportTicketEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(support_tickets::table)
            .values(&insert_ticket)
            .returning(support_tickets::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update_status(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
        status: TicketStatus,
        priority: TicketPriority,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(support_tickets::table)
            .filter(support_tickets::company_id.eq(company_id))
            .filter(support_tickets::id.eq(ticket_id))
            .filter(support_tickets::deleted_at.is_null())
            .set((
                support_tickets::status.eq(status.to_string()),
                support_tickets::priority.eq(priority.to_string()),
                support_tickets::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn soft_delete(&self, company_id: Uuid, ticket_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(support_tickets::table)
            .filter(support_tickets::company_id.eq(company_id))
            .filter(support_tickets::id.eq(ticket_id))
            .filter(support_tickets::deleted_at.is_null())
            .set(support_tickets::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
