//! Interactive ChEMBL lookup client
//!
//! Run with: cargo run -p molquery-client

use std::io;

use anyhow::Context;
use molquery_client::{run_session, McpClient};
use molquery_common::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load molquery configuration")?;

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.client_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let client = McpClient::new(&config.client.endpoint)
        .with_context(|| format!("Invalid endpoint: {}", config.client.endpoint))?;

    let init = client
        .initialize()
        .await
        .with_context(|| format!("Handshake with {} failed", client.endpoint()))?;
    info!("Connected to {} {}", init.server_info.name, init.server_info.version);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run_session(&client, &config.client, &mut stdin.lock(), &mut stdout.lock())
        .await
        .context("Lookup session failed")?;

    info!(?outcome, "Session finished");
    Ok(())
}
