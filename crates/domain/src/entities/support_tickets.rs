use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::support_tickets;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = support_tickets)]
pub struct SupportTicketEntity {
    pub id: Uuid,
    pub company_id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = support_tickets)]
pub struct InsertSupportTicketEntity {
    pub company_id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
