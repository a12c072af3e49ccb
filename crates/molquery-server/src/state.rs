//! Shared application state for the protocol server.

use std::sync::Arc;

use crate::tools::ToolRegistry;

pub const SERVER_NAME: &str = "ChEMBL_MCP";

pub const SERVER_INSTRUCTIONS: &str = "Search molecules on ChEMBL and fetch details \
    (mechanism, indications) via the ChEMBL REST API.";

/// State injected into every Axum handler. Immutable after startup.
pub struct AppState {
    pub registry: ToolRegistry,
    pub server_name: String,
    pub instructions: String,
}

impl AppState {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: SERVER_NAME.to_string(),
            instructions: SERVER_INSTRUCTIONS.to_string(),
        }
    }
}

pub type SharedState = Arc<AppState>;
