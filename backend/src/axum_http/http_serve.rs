use crate::{axum_http::default_routers, axum_http::routers, config::config_model::DotEnvyConfig};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use infra::db::postgres::postgres_connection::PgPoolSquad;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let company_routes = Router::new()
        .nest(
            "/clients",
            routers::clients::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/professionals",
            routers::professionals::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/services",
            routers::services::routes(Arc::clone(&db_pool)),
        )
        .nest("/tasks", routers::tasks::routes(Arc::clone(&db_pool)))
        .nest("/coupons", routers::coupons::routes(Arc::clone(&db_pool)))
        .nest(
            "/support-tickets",
            routers::support_tickets::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/permissions",
            routers::permissions::routes(Arc::clone(&db_pool)),
        )
        .merge(routers::subscriptions::company_routes(
            Arc::clone(&db_pool),
            Arc::clone(&config),
        ));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1/plans", routers::plans::routes(Arc::clone(&db_pool)))
        .nest(
            "/api/v1/companies",
            routers::companies::routes(Arc::clone(&db_pool)),
        )
        .nest("/api/v1/company", company_routes)
        .nest(
            "/api/v1/webhooks",
            routers::subscriptions::webhook_routes(Arc::clone(&db_pool), Arc::clone(&config)),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO Restrict to the dashboard domain
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
