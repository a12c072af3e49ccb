//! JSON-RPC client for the tool-invocation endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use molquery_common::protocol::*;
use molquery_common::{MolqueryError, Result};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::extract;
use crate::session::ToolInvoker;

/// Detail lookups fan out to three upstream calls, so this is well above
/// the server's per-call upstream timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct McpClient {
    http: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl McpClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MolqueryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, endpoint, next_id: AtomicU64::new(1) })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "Sending request");

        let resp: JsonRpcResponse = self
            .http
            .post(self.endpoint.clone())
            .json(&JsonRpcRequest::new(id, method, params))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(MolqueryError::Protocol(format!(
                "{} failed: {} (code {})",
                method, err.message, err.code
            )));
        }

        resp.result.ok_or_else(|| {
            MolqueryError::Protocol(format!("{}: response has neither result nor error", method))
        })
    }

    async fn notify(&self, method: &str) -> Result<()> {
        debug!(method, "Sending notification");
        self.http
            .post(self.endpoint.clone())
            .json(&JsonRpcRequest::notification(method))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Protocol handshake: `initialize` followed by `notifications/initialized`.
    pub async fn initialize(&self) -> Result<InitializeResult> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": { "name": "molquery-client", "version": env!("CARGO_PKG_VERSION") }
        });
        let init: InitializeResult = serde_json::from_value(self.request("initialize", params).await?)?;
        self.notify("notifications/initialized").await?;
        Ok(init)
    }

    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let list: ToolsListResult = serde_json::from_value(self.request("tools/list", json!({})).await?)?;
        Ok(list.tools)
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult> {
        let params = json!({ "name": name, "arguments": arguments });
        Ok(serde_json::from_value(self.request("tools/call", params).await?)?)
    }
}

#[async_trait]
impl ToolInvoker for McpClient {
    async fn tool_names(&self) -> Result<Vec<String>> {
        Ok(self.list_tools().await?.into_iter().map(|t| t.name).collect())
    }

    async fn invoke(&self, name: &str, arguments: Value) -> Result<Value> {
        let result = self.call_tool(name, arguments).await?;
        Ok(extract::envelope(&result))
    }
}
