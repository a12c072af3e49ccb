//! Axum router: maps URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{mcp::mcp_endpoint, system::health};
use crate::state::{AppState, SharedState};

/// Build the router with the protocol endpoint mounted at `mcp_path`.
pub fn build_router(state: AppState, mcp_path: &str) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route(mcp_path, post(mcp_endpoint))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
