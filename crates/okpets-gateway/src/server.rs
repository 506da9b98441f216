//! HTTP server implementation using Axum.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use okpets_autopilot::TaskRegistry;
use okpets_channels::{Dispatcher, OkClient};
use okpets_core::credentials::CredentialStore;
use okpets_core::error::{OkpetsError, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub ok: Arc<OkClient>,
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<CredentialStore>,
    pub registry: Arc<TaskRegistry>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);
    Router::new()
        .route("/", get(super::routes::index))
        .route("/health", get(super::routes::health_check))
        .route("/oauth/callback", get(super::routes::oauth_callback))
        .route("/webhook", post(super::routes::webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(shared)
}

/// Bind and serve until the shutdown future resolves.
pub async fn serve(
    addr: &str,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| OkpetsError::Gateway(format!("Failed to bind {addr}: {e}")))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| OkpetsError::Gateway(format!("Server error: {e}")))
}
