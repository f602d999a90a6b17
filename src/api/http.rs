//! HTTP server setup with Axum

use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use super::websocket::{handler::ws_handler, state::RelayState, SharedState};
use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};

/// Create the Axum router with all endpoints
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS restricted to the configured origin allow-list
fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "skipping origin that is not a valid header value");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub connections: usize,
    pub uptime_secs: i64,
}

/// Health check endpoint
async fn health_check(State(state): State<SharedState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        connections: state.connection_count(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Bind the configured address and serve until Ctrl+C
pub async fn serve(config: RelayConfig) -> RelayResult<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| RelayError::Bind { addr, source })?;

    let state = Arc::new(RelayState::new(config));
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: SharedState,
    shutdown: F,
) -> RelayResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        origins = ?state.config.allowed_origins,
        "relay listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
