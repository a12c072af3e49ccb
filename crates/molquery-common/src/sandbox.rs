use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use std::collections::HashSet;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::MolqueryError;

/// Hosts that are always reachable regardless of the upstream setting.
const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Same hop limit as reqwest's default policy.
const MAX_REDIRECTS: usize = 10;

/// An HTTP client that only talks to approved hosts.
///
/// The allowlist is checked on the initial URL and again on every redirect
/// hop. Every request carries `Accept: application/json` and is bounded by
/// the configured upstream timeout.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: Arc<HashSet<String>>,
}

/// Exact match or a subdomain of an allowed host.
fn host_allowed(allowlist: &HashSet<String>, url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    allowlist
        .iter()
        .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
}

fn redirect_policy(allowlist: Arc<HashSet<String>>) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            let reason = format!("too many redirects (limit {})", MAX_REDIRECTS);
            attempt.error(reason)
        } else if host_allowed(&allowlist, attempt.url()) {
            attempt.follow()
        } else {
            let reason = format!("redirect to {} refused: domain not in allowlist", attempt.url());
            attempt.error(reason)
        }
    })
}

impl SandboxClient {
    /// Builds a client whose allowlist holds the upstream host plus loopback.
    pub fn new(upstream: &UpstreamConfig) -> Result<Self, MolqueryError> {
        let base = Url::parse(&upstream.base_url)?;
        let host = base.host_str().ok_or_else(|| {
            MolqueryError::Config(format!("Upstream URL has no host: {}", upstream.base_url))
        })?;

        let mut allowlist: HashSet<String> =
            LOOPBACK_HOSTS.iter().map(|h| h.to_string()).collect();
        allowlist.insert(host.to_string());
        let allowlist = Arc::new(allowlist);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(upstream.timeout_secs))
            .default_headers(headers)
            .redirect(redirect_policy(Arc::clone(&allowlist)))
            .build()
            .map_err(|e| MolqueryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &Url) -> bool {
        host_allowed(&self.allowlist, url)
    }

    /// Starts a GET request, refusing hosts outside the allowlist.
    pub fn get(&self, url: Url) -> Result<RequestBuilder, MolqueryError> {
        if !self.is_allowed(&url) {
            tracing::warn!(%url, "Refusing request to host outside allowlist");
            return Err(MolqueryError::Sandbox(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }

    /// Sends a request built by [`SandboxClient::get`]. A redirect the
    /// policy refused comes back as [`MolqueryError::Sandbox`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, MolqueryError> {
        request.send().await.map_err(|e| {
            if e.is_redirect() {
                let reason = e
                    .source()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| e.to_string());
                tracing::warn!(%reason, "Redirect refused");
                MolqueryError::Sandbox(reason)
            } else {
                MolqueryError::Http(e)
            }
        })
    }
}
