//! molquery-common: Shared errors, configuration, the allowlisted HTTP client
//! and the tool-invocation protocol types used across all molquery crates.

pub mod config;
pub mod error;
pub mod protocol;
pub mod sandbox;

pub use config::Config;
pub use error::{MolqueryError, Result};
pub use sandbox::SandboxClient;
