use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::access_gate::TenantGuard;
use crate::usecases::services::ServiceUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::{
        companies::CompanyRepository, plans::PlanRepository, services::ServiceRepository,
    },
    value_objects::services::{InsertServiceModel, UpdateServiceModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{
        companies::CompanyPostgres, plans::PlanPostgres, services::ServicePostgres,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let service_repository = ServicePostgres::new(Arc::clone(&db_pool));
    let guard = TenantGuard::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );
    let services_usecase = ServiceUseCase::new(Arc::new(service_repository), guard);

    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/:service_id", put(update_service).delete(delete_service))
        .with_state(Arc::new(services_usecase))
}

pub async fn list_services<S, C, P>(
    State(usecase): State<Arc<ServiceUseCase<S, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(services) => (StatusCode::OK, Json(services)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_service<S, C, P>(
    State(usecase): State<Arc<ServiceUseCase<S, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_service): Json<InsertServiceModel>,
) -> impl IntoResponse
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "services: create request received");
    match usecase.create(company_id, insert_service).await {
        Ok(service_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": service_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_service<S, C, P>(
    State(usecase): State<Arc<ServiceUseCase<S, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(service_id): Path<Uuid>,
    Json(update_service): Json<UpdateServiceModel>,
) -> impl IntoResponse
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.update(company_id, service_id, update_service).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_service<S, C, P>(
    State(usecase): State<Arc<ServiceUseCase<S, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(service_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: ServiceRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, service_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
