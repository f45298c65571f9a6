use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::access_gate::TenantGuard;
use crate::usecases::professionals::ProfessionalUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::{
        companies::CompanyRepository, plans::PlanRepository,
        professionals::ProfessionalRepository,
    },
    value_objects::professionals::{InsertProfessionalModel, UpdateProfessionalModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{
        companies::CompanyPostgres, plans::PlanPostgres, professionals::ProfessionalPostgres,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let professional_repository = ProfessionalPostgres::new(Arc::clone(&db_pool));
    let guard = TenantGuard::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );
    let professionals_usecase =
        ProfessionalUseCase::new(Arc::new(professional_repository), guard);

    Router::new()
        .route("/", get(list_professionals).post(create_professional))
        .route(
            "/:professional_id",
            put(update_professional).delete(delete_professional),
        )
        .with_state(Arc::new(professionals_usecase))
}

pub async fn list_professionals<Pr, C, P>(
    State(usecase): State<Arc<ProfessionalUseCase<Pr, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(professionals) => (StatusCode::OK, Json(professionals)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_professional<Pr, C, P>(
    State(usecase): State<Arc<ProfessionalUseCase<Pr, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_professional): Json<InsertProfessionalModel>,
) -> impl IntoResponse
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "professionals: create request received");
    match usecase.create(company_id, insert_professional).await {
        Ok(professional_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": professional_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_professional<Pr, C, P>(
    State(usecase): State<Arc<ProfessionalUseCase<Pr, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(professional_id): Path<Uuid>,
    Json(update_professional): Json<UpdateProfessionalModel>,
) -> impl IntoResponse
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase
        .update(company_id, professional_id, update_professional)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_professional<Pr, C, P>(
    State(usecase): State<Arc<ProfessionalUseCase<Pr, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(professional_id): Path<Uuid>,
) -> impl IntoResponse
where
    Pr: ProfessionalRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, professional_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
