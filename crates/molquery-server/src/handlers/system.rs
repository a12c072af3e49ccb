//! Liveness endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "server": state.server_name,
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.registry.len(),
    }))
}
