use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::access_gate::TenantGuard;
use crate::usecases::tasks::TaskUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use domain::{
    repositories::{companies::CompanyRepository, plans::PlanRepository, tasks::TaskRepository},
    value_objects::tasks::{InsertTaskModel, UpdateTaskModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{companies::CompanyPostgres, plans::PlanPostgres, tasks::TaskPostgres},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let task_repository = TaskPostgres::new(Arc::clone(&db_pool));
    let guard = TenantGuard::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );
    let tasks_usecase = TaskUseCase::new(Arc::new(task_repository), guard);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:task_id", put(update_task).delete(delete_task))
        .with_state(Arc::new(tasks_usecase))
}

pub async fn list_tasks<T, C, P>(
    State(usecase): State<Arc<TaskUseCase<T, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_task<T, C, P>(
    State(usecase): State<Arc<TaskUseCase<T, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_task): Json<InsertTaskModel>,
) -> impl IntoResponse
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "tasks: create request received");
    match usecase.create(company_id, insert_task).await {
        Ok(task_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": task_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_task<T, C, P>(
    State(usecase): State<Arc<TaskUseCase<T, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(task_id): Path<Uuid>,
    Json(update_task): Json<UpdateTaskModel>,
) -> impl IntoResponse
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.update(company_id, task_id, update_task).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_task<T, C, P>(
    State(usecase): State<Arc<TaskUseCase<T, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TaskRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, task_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
