use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::support_tickets::SupportTicketEntity;
use crate::value_objects::enums::ticket_statuses::{TicketPriority, TicketStatus};

#[derive(Debug, Serialize)]
pub struct SupportTicketDto {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SupportTicketEntity> for SupportTicketDto {
    fn from(value: SupportTicketEntity) -> Self {
        Self {
            id: value.id,
            subject: value.subject,
            message: value.message,
            status: value.status,
            priority: value.priority,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertSupportTicketModel {
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSupportTicketModel {
    pub status: TicketStatus,
    pub priority: TicketPriority,
}
