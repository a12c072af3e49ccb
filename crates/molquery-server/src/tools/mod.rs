//! Tool registration for the molquery server.
//!
//! Each remote-callable operation implements `MolqueryTool` and is registered
//! in a central `ToolRegistry`. The JSON-RPC layer lists tools through
//! `ToolRegistry::descriptors` and invokes them with `ToolRegistry::invoke`.
//!
//! Tools never fail across the boundary: whatever goes wrong comes back as a
//! `ToolOutput` whose envelope carries an empty `result` and an `error`.

pub mod molecules_tool;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use molquery_chembl::{Lookup, MoleculeSource};
use molquery_common::protocol::ToolDescriptor;
use serde::Serialize;
use serde_json::{json, Value};

// ─────────────────────────────────────────────
//  Core trait
// ─────────────────────────────────────────────

/// A remote-callable operation.
///
/// - `name()` must be unique across the registry (snake_case).
/// - `description()` is surfaced to clients as the tool docstring.
/// - `parameters_schema()` returns a JSON Schema object for the arguments.
/// - `invoke()` receives the raw JSON arguments.
#[async_trait]
pub trait MolqueryTool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters_schema(&self) -> Value;

    async fn invoke(&self, params: Value) -> ToolOutput;
}

/// Envelope produced by a tool call plus bookkeeping for logs.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `{ "result": ..., "error"?: "..." }`
    pub envelope: Value,
    pub is_error: bool,
    pub duration: Duration,
}

impl ToolOutput {
    pub fn from_lookup<T: Serialize>(lookup: &Lookup<T>, start: Instant) -> Self {
        let envelope = serde_json::to_value(lookup).unwrap_or_else(|e| {
            json!({ "result": Value::Null, "error": format!("Serialization error: {}", e) })
        });
        Self {
            envelope,
            is_error: !lookup.is_ok(),
            duration: start.elapsed(),
        }
    }

    /// Failure with the tool's empty result shape (`[]`, `{}`, ...).
    pub fn failure(empty: Value, message: impl Into<String>, start: Instant) -> Self {
        Self {
            envelope: json!({ "result": empty, "error": message.into() }),
            is_error: true,
            duration: start.elapsed(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.envelope.get("error").and_then(Value::as_str)
    }
}

// ─────────────────────────────────────────────
//  Tool registry
// ─────────────────────────────────────────────

/// Central registry mapping tool names → trait objects.
/// Build once at startup, then share via Arc.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn MolqueryTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: BTreeMap::new() }
    }

    /// Register a tool. Panics if the name is already registered.
    pub fn register<T: MolqueryTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        assert!(
            !self.tools.contains_key(&name),
            "Duplicate tool name: {name}"
        );
        self.tools.insert(name, Arc::new(tool));
    }

    /// Invoke a registered tool by name.
    pub async fn invoke(&self, name: &str, params: Value) -> ToolOutput {
        let Some(tool) = self.tools.get(name) else {
            tracing::warn!(tool = name, "Unknown tool requested");
            return ToolOutput::failure(Value::Null, format!("Unknown tool: {name}"), Instant::now());
        };

        tracing::info!(tool = name, "Invoking tool");
        let output = tool.invoke(params).await;

        match output.error_message() {
            Some(error) => tracing::warn!(
                tool = name,
                elapsed_ms = output.duration.as_millis() as u64,
                error,
                "Tool returned an error"
            ),
            None => tracing::info!(
                tool = name,
                elapsed_ms = output.duration.as_millis() as u64,
                "Tool finished"
            ),
        }

        output
    }

    /// Tool definitions for `tools/list`, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize { self.tools.len() }

    pub fn is_empty(&self) -> bool { self.tools.is_empty() }
}

impl Default for ToolRegistry {
    fn default() -> Self { Self::new() }
}

/// Build the registry with `search_molecules` and `get_molecule_details`.
pub fn build_default_registry(source: Arc<dyn MoleculeSource>) -> ToolRegistry {
    let mut reg = ToolRegistry::new();
    reg.register(molecules_tool::SearchMoleculesTool::new(source.clone()));
    reg.register(molecules_tool::GetMoleculeDetailsTool::new(source));
    tracing::info!("ToolRegistry ready with {} tools", reg.len());
    reg
}

// ─────────────────────────────────────────────
//  Tests
// ─────────────────────────────────────────────
