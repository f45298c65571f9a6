use crate::auth::AdminUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::plans::PlanUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::plans::PlanRepository,
    value_objects::plans::{InsertPlanModel, UpdatePlanModel},
};
use infra::db::{postgres::postgres_connection::PgPoolSquad, repositories::plans::PlanPostgres};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let plans_usecase = PlanUseCase::new(Arc::new(plan_repository));

    Router::new()
        .route("/public", get(list_public_plans))
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", put(update_plan).delete(deactivate_plan))
        .with_state(Arc::new(plans_usecase))
}

/// Pricing page listing; the only unauthenticated plan surface.
pub async fn list_public_plans<P>(
    State(usecase): State<Arc<PlanUseCase<P>>>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list_public().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_plans<P>(
    State(usecase): State<Arc<PlanUseCase<P>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list_all().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_plan<P>(
    State(usecase): State<Arc<PlanUseCase<P>>>,
    AdminUser { user_id }: AdminUser,
    Json(insert_plan): Json<InsertPlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    info!(admin_id = %user_id, "plans: create request received");
    match usecase.create(insert_plan).await {
        Ok(plan_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": plan_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_plan<P>(
    State(usecase): State<Arc<PlanUseCase<P>>>,
    AdminUser { user_id }: AdminUser,
    Path(plan_id): Path<Uuid>,
    Json(update_plan): Json<UpdatePlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    info!(admin_id = %user_id, %plan_id, "plans: update request received");
    match usecase.update(plan_id, update_plan).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn deactivate_plan<P>(
    State(usecase): State<Arc<PlanUseCase<P>>>,
    AdminUser { user_id }: AdminUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
{
    info!(admin_id = %user_id, %plan_id, "plans: deactivate request received");
    match usecase.deactivate(plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
