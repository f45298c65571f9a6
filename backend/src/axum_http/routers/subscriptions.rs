use crate::auth::CompanyUser;
use crate::axum_http::error_responses::error_response;
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::access_gate::AccessGateUseCase;
use crate::usecases::subscriptions::{AsaasGateway, SubscriptionUseCase};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use domain::{
    repositories::{companies::CompanyRepository, plans::PlanRepository},
    value_objects::companies::{AccessDto, SubscribeRequest},
};
use infra::db::{
    postgres::postgres_connection::PgPoolSquad,
    repositories::{companies::CompanyPostgres, plans::PlanPostgres},
};
use payments::asaas_client::AsaasClient;
use std::sync::Arc;
use tracing::info;

fn build_usecase(
    db_pool: &Arc<PgPoolSquad>,
    config: &Arc<DotEnvyConfig>,
) -> SubscriptionUseCase<CompanyPostgres, PlanPostgres, AsaasClient> {
    let asaas_client = AsaasClient::new(
        config.asaas.api_key.clone(),
        config.asaas.webhook_token.clone(),
        config.asaas.base_url.clone(),
    );

    SubscriptionUseCase::new(
        Arc::new(CompanyPostgres::new(Arc::clone(db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(db_pool))),
        Arc::new(asaas_client),
    )
}

/// Tenant-facing billing surface, nested under `/company`.
pub fn company_routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let access_usecase =
        AccessGateUseCase::new(Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))));

    let access_router = Router::new()
        .route("/access", get(check_access))
        .with_state(Arc::new(access_usecase));

    Router::new()
        .route("/subscription-status", get(subscription_status))
        .route("/subscribe", post(subscribe))
        .route("/cancel", post(cancel_subscription))
        .with_state(Arc::new(build_usecase(&db_pool, &config)))
        .merge(access_router)
}

/// Billing webhook receiver, nested under `/webhooks`.
pub fn webhook_routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    Router::new()
        .route("/asaas", post(asaas_webhook))
        .with_state(Arc::new(build_usecase(&db_pool, &config)))
}

pub async fn subscription_status<C, P, A>(
    State(usecase): State<Arc<SubscriptionUseCase<C, P, A>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AsaasGateway + Send + Sync + 'static,
{
    match usecase.get_subscription_status(company_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn check_access<C>(
    State(usecase): State<Arc<AccessGateUseCase<C>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
{
    let state = usecase.evaluate(company_id).await;
    (StatusCode::OK, Json(AccessDto::from(state))).into_response()
}

pub async fn subscribe<C, P, A>(
    State(usecase): State<Arc<SubscriptionUseCase<C, P, A>>>,
    CompanyUser { company_id, .. }: CompanyUser,
    Json(request): Json<SubscribeRequest>,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AsaasGateway + Send + Sync + 'static,
{
    info!(%company_id, plan_id = %request.plan_id, "subscriptions: subscribe request received");
    match usecase.subscribe(company_id, request.plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn cancel_subscription<C, P, A>(
    State(usecase): State<Arc<SubscriptionUseCase<C, P, A>>>,
    CompanyUser { company_id, .. }: CompanyUser,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AsaasGateway + Send + Sync + 'static,
{
    info!(%company_id, "subscriptions: cancel request received");
    match usecase.cancel(company_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn asaas_webhook<C, P, A>(
    State(usecase): State<Arc<SubscriptionUseCase<C, P, A>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    C: CompanyRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AsaasGateway + Send + Sync + 'static,
{
    let provided_token = headers
        .get("asaas-access-token")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match usecase.handle_asaas_webhook(&body, provided_token).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
