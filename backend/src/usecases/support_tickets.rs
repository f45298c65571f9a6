use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use domain::{
    entities::support_tickets::InsertSupportTicketEntity,
    repositories::support_tickets::SupportTicketRepository,
    value_objects::{
        enums::ticket_statuses::TicketStatus,
        support_tickets::{InsertSupportTicketModel, SupportTicketDto, UpdateSupportTicketModel},
    },
};

#[derive(Debug, Error)]
pub enum SupportTicketError {
    #[error("support ticket not found")]
    NotFound,
    #[error("invalid support ticket: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl SupportTicketError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SupportTicketError::NotFound => StatusCode::NOT_FOUND,
            SupportTicketError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SupportTicketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SupportTicketResult<T> = std::result::Result<T, SupportTicketError>;

/// Support is always reachable: no plan permission and no subscription gate
/// in front of it, so a blocked tenant can still contact the platform.
pub struct SupportTicketUseCase<S>
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    ticket_repo: Arc<S>,
}

impl<S> SupportTicketUseCase<S>
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    pub fn new(ticket_repo: Arc<S>) -> Self {
        Self { ticket_repo }
    }

    pub async fn list(&self, company_id: Uuid) -> SupportTicketResult<Vec<SupportTicketDto>> {
        let tickets = self
            .ticket_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "support: failed to list tickets");
                SupportTicketError::Internal(err)
            })?;

        Ok(tickets.into_iter().map(SupportTicketDto::from).collect())
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        insert_ticket: InsertSupportTicketModel,
    ) -> SupportTicketResult<Uuid> {
        if insert_ticket.subject.trim().is_empty() {
            return Err(SupportTicketError::Validation("subject is required".into()));
        }
        if insert_ticket.message.trim().is_empty() {
            return Err(SupportTicketError::Validation("message is required".into()));
        }

        let now = Utc::now();
        let ticket_id = self
            .ticket_repo
            .create(InsertSupportTicketEntity {
                company_id,
                subject: insert_ticket.subject,
                message: insert_ticket.message,
                status: TicketStatus::Open.to_string(),
                priority: insert_ticket.priority.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "support: failed to create ticket");
                SupportTicketError::Internal(err)
            })?;

        info!(%company_id, %ticket_id, "support: ticket opened");
        Ok(ticket_id)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
        update_ticket: UpdateSupportTicketModel,
    ) -> SupportTicketResult<()> {
        self.ticket_repo
            .find_by_id(company_id, ticket_id)
            .await
            .map_err(SupportTicketError::Internal)?
            .ok_or(SupportTicketError::NotFound)?;

        self.ticket_repo
            .update_status(
                company_id,
                ticket_id,
                update_ticket.status,
                update_ticket.priority,
            )
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %ticket_id,
                    db_error = ?err,
                    "support: failed to update ticket"
                );
                SupportTicketError::Internal(err)
            })?;

        Ok(())
    }

    pub async fn delete(&self, company_id: Uuid, ticket_id: Uuid) -> SupportTicketResult<()> {
        self.ticket_repo
            .find_by_id(company_id, ticket_id)
            .await
            .map_err(SupportTicketError::Internal)?
            .ok_or(SupportTicketError::NotFound)?;

        self.ticket_repo
            .soft_delete(company_id, ticket_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %ticket_id,
                    db_error = ?err,
                    "support: failed to delete ticket"
                );
                SupportTicketError::Internal(err)
            })?;

        info!(%company_id, %ticket_id, "support: ticket removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::support_tickets::MockSupportTicketRepository;
    use domain::value_objects::enums::ticket_statuses::TicketPriority;

    #[tokio::test]
    async fn create_opens_ticket_with_open_status() {
        let mut ticket_repo = MockSupportTicketRepository::new();
        ticket_repo
            .expect_create()
            .withf(|insert| insert.status == "open" && insert.priority == "high")
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = SupportTicketUseCase::new(Arc::new(ticket_repo));

        usecase
            .create(
                Uuid::new_v4(),
                InsertSupportTicketModel {
                    subject: "Cobranca duplicada".to_string(),
                    message: "Fomos cobrados duas vezes neste mes.".to_string(),
                    priority: TicketPriority::High,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_requires_subject_and_message() {
        let usecase = SupportTicketUseCase::new(Arc::new(MockSupportTicketRepository::new()));

        let err = usecase
            .create(
                Uuid::new_v4(),
                InsertSupportTicketModel {
                    subject: " ".to_string(),
                    message: "ajuda".to_string(),
                    priority: TicketPriority::Normal,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SupportTicketError::Validation(_)));
    }
}
