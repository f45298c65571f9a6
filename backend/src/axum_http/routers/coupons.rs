use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::usecases::access_gate::TenantGuard;
use crate::usecases::coupons::CouponUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use domain::{
    repositories::{
        companies::CompanyRepository, coupons::CouponRepository, plans::PlanRepository,
    },
    value_objects::coupons::{EvaluateCouponRequest, InsertCouponModel, UpdateCouponModel},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{
        companies::CompanyPostgres, coupons::CouponPostgres, plans::PlanPostgres,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let coupon_repository = CouponPostgres::new(Arc::clone(&db_pool));
    let guard = TenantGuard::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );
    let coupons_usecase = CouponUseCase::new(Arc::new(coupon_repository), guard);

    Router::new()
        .route("/", get(list_coupons).post(create_coupon))
        .route("/evaluate", post(evaluate_coupon))
        .route("/redeem", post(redeem_coupon))
        .route("/:coupon_id", put(update_coupon).delete(delete_coupon))
        .with_state(Arc::new(coupons_usecase))
}

pub async fn list_coupons<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.list(company_id).await {
        Ok(coupons) => (StatusCode::OK, Json(coupons)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn create_coupon<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(insert_coupon): Json<InsertCouponModel>,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "coupons: create request received");
    match usecase.create(company_id, insert_coupon).await {
        Ok(coupon_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": coupon_id })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn evaluate_coupon<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(request): Json<EvaluateCouponRequest>,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.evaluate(company_id, request).await {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn redeem_coupon<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(request): Json<EvaluateCouponRequest>,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    info!(%company_id, "coupons: redeem request received");
    match usecase.redeem(company_id, request).await {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_coupon<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(coupon_id): Path<Uuid>,
    Json(update_coupon): Json<UpdateCouponModel>,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.update(company_id, coupon_id, update_coupon).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_coupon<Cp, C, P>(
    State(usecase): State<Arc<CouponUseCase<Cp, C, P>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Path(coupon_id): Path<Uuid>,
) -> impl IntoResponse
where
    Cp: CouponRepository + Send + Sync + 'static,
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match usecase.delete(company_id, coupon_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
