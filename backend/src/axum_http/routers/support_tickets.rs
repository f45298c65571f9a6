use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::support_tickets::SupportTicketUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::support_tickets::SupportTicketRepository,
    value_objects::support_tickets::{InsertSupportTicketModel, UpdateSupportTicketModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad, repositories::support_tickets::SupportTicketPostgres,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let ticket_repository = SupportTicketPostgres::new(Arc::clone(&db_pool));
    let tickets_usecase = SupportTicketUseCase::new(Arc::new(ticket_repository));

    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/:ticket_id", put(update_ticket).delete(delete_ticket))
        .with_state(Arc::new(tickets_usecase))
}

pub async fn list_tickets<S>(
    State(usecase): State<Arc<SupportTicketUseCase<S>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_ticket<S>(
    State(usecase): State<Arc<SupportTicketUseCase<S>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_ticket): Json<InsertSupportTicketModel>,
) -> impl IntoResponse
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    info!(%company_id, "support: ticket create request received");
    match usecase.create(company_id, insert_ticket).await {
        Ok(ticket_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": ticket_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_ticket<S>(
    State(usecase): State<Arc<SupportTicketUseCase<S>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(ticket_id): Path<Uuid>,
    Json(update_ticket): Json<UpdateSupportTicketModel>,
) -> impl IntoResponse
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    match usecase.update(company_id, ticket_id, update_ticket).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_ticket<S>(
    State(usecase): State<Arc<SupportTicketUseCase<S>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(ticket_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SupportTicketRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, ticket_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
