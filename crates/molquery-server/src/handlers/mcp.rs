//! JSON-RPC endpoint for the tool-invocation protocol.
//!
//! One request per POST. Notifications get `202 Accepted` with no body;
//! everything else gets a JSON-RPC response, including protocol errors.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use molquery_common::protocol::*;
use serde_json::{json, Value};
use tracing::debug;

use crate::state::{AppState, SharedState};

pub async fn mcp_endpoint(State(state): State<SharedState>, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return Json(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())).into_response()
        }
    };

    let req: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
        Ok(r) => r,
        Err(e) => {
            let id = raw.get("id").cloned();
            return Json(JsonRpcResponse::error(id, INVALID_REQUEST, e.to_string())).into_response();
        }
    };

    match dispatch(&state, req).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Handle a single JSON-RPC message. Returns `None` for notifications.
pub async fn dispatch(state: &AppState, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = req.id.clone();

    if req.jsonrpc != JSONRPC_VERSION {
        return Some(JsonRpcResponse::error(
            id,
            INVALID_REQUEST,
            format!("Unsupported jsonrpc version: {}", req.jsonrpc),
        ));
    }

    if req.is_notification() {
        debug!(method = %req.method, "Notification received");
        return None;
    }

    debug!(method = %req.method, "Request received");

    let result = match req.method.as_str() {
        "initialize" => serde_json::to_value(InitializeResult {
            protocol_version: PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: state.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            instructions: Some(state.instructions.clone()),
        }),

        "ping" => Ok(json!({})),

        "tools/list" => serde_json::to_value(ToolsListResult {
            tools: state.registry.descriptors(),
        }),

        "tools/call" => {
            let params: ToolCallParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
            };

            let arguments = if params.arguments.is_null() {
                json!({})
            } else {
                params.arguments
            };

            let output = state.registry.invoke(&params.name, arguments).await;
            serde_json::to_value(ToolCallResult::structured(output.envelope, output.is_error))
        }

        other => {
            return Some(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", other),
            ))
        }
    };

    Some(match result {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    })
}
