//! molquery-server: tool-invocation server for ChEMBL lookups.
//! Exposes over JSON-RPC (MCP-style, HTTP POST):
//!   - `search_molecules(q, limit = 10)`
//!   - `get_molecule_details(chembl_id)`

pub mod handlers;
pub mod router;
pub mod state;
pub mod tools;

use std::sync::Arc;

use molquery_chembl::{ChemblClient, MoleculeSource};
use molquery_common::Config;

/// Wires the ChEMBL client, tool registry and router from configuration.
pub fn build_app(config: &Config) -> molquery_common::Result<axum::Router> {
    let client = ChemblClient::new(&config.upstream)?;
    tracing::info!(upstream = %client.base_url(), "ChEMBL client ready");

    let source: Arc<dyn MoleculeSource> = Arc::new(client);
    let registry = tools::build_default_registry(source);
    Ok(router::build_router(state::AppState::new(registry), &config.server.path))
}
