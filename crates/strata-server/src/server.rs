//! Router assembly and server lifecycle.

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    config::{
        create_config, delete_config, list_configs, list_versions, read_config, recover_config,
        update_config,
    },
    health::health_check,
};
use crate::state::AppState;

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/health", get(health_check))
        .route("/configs/{project}", get(list_configs))
        .route(
            "/configs/{project}/{name}",
            post(create_config)
                .get(read_config)
                .put(update_config)
                .delete(delete_config),
        )
        .route("/configs/{project}/{name}/versions", get(list_versions))
        .route(
            "/configs/{project}/{name}/recover/{version}",
            post(recover_config),
        )
        .layer(middleware)
        .with_state(state)
}

/// Runs the server until a shutdown signal arrives.
pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
