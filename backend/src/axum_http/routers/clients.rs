use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::access_gate::TenantGuard;
use crate::usecases::clients::ClientUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::{
        clients::ClientRepository, companies::CompanyRepository, plans::PlanRepository,
    },
    value_objects::clients::{InsertClientModel, UpdateClientModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{
        clients::ClientPostgres, companies::CompanyPostgres, plans::PlanPostgres,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let guard = TenantGuard::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );
    let clients_usecase = ClientUseCase::new(Arc::new(client_repository), guard);

    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/:client_id", put(update_client).delete(delete_client))
        .with_state(Arc::new(clients_usecase))
}

pub async fn list_clients<Cl, C, P>(
    State(usecase): State<Arc<ClientUseCase<Cl, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(clients) => (StatusCode::OK, Json(clients)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_client<Cl, C, P>(
    State(usecase): State<Arc<ClientUseCase<Cl, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_client): Json<InsertClientModel>,
) -> impl IntoResponse
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "clients: create request received");
    match usecase.create(company_id, insert_client).await {
        Ok(client_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": client_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_client<Cl, C, P>(
    State(usecase): State<Arc<ClientUseCase<Cl, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(client_id): Path<Uuid>,
    Json(update_client): Json<UpdateClientModel>,
) -> impl IntoResponse
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.update(company_id, client_id, update_client).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_client<Cl, C, P>(
    State(usecase): State<Arc<ClientUseCase<Cl, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse
where
    Cl: ClientRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, client_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
