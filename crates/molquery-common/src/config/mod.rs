//! Configuration loading for molquery.
//! Reads molquery.toml from the current directory or the path in the
//! MOLQUERY_CONFIG env var. Every setting has a default, so a missing
//! default-location file is not an error.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{MolqueryError, Result};

pub const CONFIG_ENV: &str = "MOLQUERY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "molquery.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_bind() -> String { "127.0.0.1:8001".to_string() }
fn default_path() -> String { "/mcp".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), path: default_path() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size for the mechanism and indication sub-queries.
    #[serde(default = "default_related_page_size")]
    pub related_page_size: u32,
}

fn default_base_url()          -> String { "https://www.ebi.ac.uk/chembl/api/data".to_string() }
fn default_timeout_secs()      -> u64    { 30 }
fn default_related_page_size() -> u32    { 50 }

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            related_page_size: default_related_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// How many mechanisms / indications the client prints.
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
}

fn default_endpoint()     -> String { "http://127.0.0.1:8001/mcp".to_string() }
fn default_search_limit() -> u32    { 10 }
fn default_max_listed()   -> usize  { 5 }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            search_limit: default_search_limit(),
            max_listed: default_max_listed(),
        }
    }
}

/// Fallback `EnvFilter` directives when RUST_LOG is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used by the server binary.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Used by the interactive client, kept quiet so prompts stay readable.
    #[serde(default = "default_client_filter")]
    pub client_filter: String,
}

fn default_filter()        -> String { "molquery=debug,info".to_string() }
fn default_client_filter() -> String { "warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter(), client_filter: default_client_filter() }
    }
}

mod tests;

impl Config {
    /// Load configuration from molquery.toml.
    /// Checks MOLQUERY_CONFIG first, then the current directory.
    pub fn load() -> Result<Self> {
        Self::load_with(Path::new(DEFAULT_CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Loads from the path named by `CONFIG_ENV` in `lookup`, else from
    /// `default_file`. A missing default file yields defaults; a missing
    /// explicit path is an error. Env overrides come from `lookup` too.
    pub fn load_with<F>(default_file: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = lookup(CONFIG_ENV).map(PathBuf::from);
        let path = explicit.as_deref().unwrap_or(default_file);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)?
        } else if explicit.is_some() {
            return Err(MolqueryError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        } else {
            Self::default()
        };

        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies MOLQUERY_BIND, MOLQUERY_UPSTREAM_URL and MOLQUERY_ENDPOINT.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("MOLQUERY_BIND") {
            self.server.bind = bind;
        }
        if let Some(url) = lookup("MOLQUERY_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(endpoint) = lookup("MOLQUERY_ENDPOINT") {
            self.client.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if !self.server.path.starts_with('/') {
            return Err(MolqueryError::Config(format!(
                "server.path must start with '/': {}",
                self.server.path
            )));
        }
        Url::parse(&self.upstream.base_url)
            .map_err(|e| MolqueryError::Config(format!("upstream.base_url: {}", e)))?;
        Url::parse(&self.client.endpoint)
            .map_err(|e| MolqueryError::Config(format!("client.endpoint: {}", e)))?;
        if self.upstream.timeout_secs == 0 {
            return Err(MolqueryError::Config("upstream.timeout_secs must be > 0".into()));
        }
        if self.upstream.related_page_size == 0 {
            return Err(MolqueryError::Config("upstream.related_page_size must be > 0".into()));
        }
        if self.client.search_limit == 0 {
            return Err(MolqueryError::Config("client.search_limit must be > 0".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| MolqueryError::Config(format!("server.bind '{}': {}", self.server.bind, e)))
    }
}
