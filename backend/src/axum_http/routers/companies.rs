use crate::auth::AdminUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::companies::CompanyUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use domain::{
    repositories::{companies::CompanyRepository, plans::PlanRepository},
    value_objects::companies::{
        AssignPlanModel, RegisterCompanyModel, UpdateCompanyStatusModel,
    },
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{companies::CompanyPostgres, plans::PlanPostgres},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let company_repository = CompanyPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let companies_usecase =
        CompanyUseCase::new(Arc::new(company_repository), Arc::new(plan_repository));

    Router::new()
        .route("/register", post(register_company))
        .route("/", get(list_companies))
        .route("/:company_id/status", patch(update_company_status))
        .route("/:company_id/plan", patch(assign_company_plan))
        .with_state(Arc::new(companies_usecase))
}

/// Self-registration; open by design.
pub async fn register_company<C, P>(
    State(usecase): State<Arc<CompanyUseCase<C, P>>>,
    Json(register_company): Json<RegisterCompanyModel>,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!("companies: registration request received");
    match usecase.register(register_company).await {
        Ok(company_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": company_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_companies<C, P>(
    State(usecase): State<Arc<CompanyUseCase<C, P>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list().await {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_company_status<C, P>(
    State(usecase): State<Arc<CompanyUseCase<C, P>>>,
    AdminUser { user_id }: AdminUser,
    Path(company_id): Path<Uuid>,
    Json(update_status): Json<UpdateCompanyStatusModel>,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(
        admin_id = %user_id,
        %company_id,
        "companies: status update request received"
    );
    match usecase.update_status(company_id, update_status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn assign_company_plan<C, P>(
    State(usecase): State<Arc<CompanyUseCase<C, P>>>,
    AdminUser { user_id }: AdminUser,
    Path(company_id): Path<Uuid>,
    Json(assign_plan): Json<AssignPlanModel>,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(
        admin_id = %user_id,
        %company_id,
        "companies: plan assignment request received"
    );
    match usecase.assign_plan(company_id, assign_plan.plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
