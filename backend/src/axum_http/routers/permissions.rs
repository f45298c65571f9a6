use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::permissions::PermissionUseCase;
use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use domain::repositories::{
    companies::CompanyRepository, plans::PlanRepository, professionals::ProfessionalRepository,
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{
        companies::CompanyPostgres, plans::PlanPostgres, professionals::ProfessionalPostgres,
    },
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let permissions_usecase = PermissionUseCase::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
        Arc::new(ProfessionalPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/", get(company_permissions))
        .with_state(Arc::new(permissions_usecase))
}

/// The resolved permission map the navigation renders from, plus the
/// professional-limit info that drives the add-professional button.
pub async fn company_permissions<C, P, Pr>(
    State(usecase): State<Arc<PermissionUseCase<C, P, Pr>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pr: ProfessionalRepository + Send + Sync + 'static,
{
    match usecase.company_permissions(company_id).await {
        Ok(permissions) => (StatusCode::OK, Json(permissions)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
