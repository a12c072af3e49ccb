//! Client session against a live server bound to an ephemeral port, with
//! ChEMBL replaced by a mock.

use std::io::Cursor;

use molquery_client::{run_session, McpClient, SessionOutcome};
use molquery_common::config::ClientConfig;
use molquery_common::Config;
use molquery_test_utils::{fixtures, MockChembl};
use pretty_assertions::assert_eq;

async fn spawn_server(mock: &MockChembl) -> String {
    let config = Config {
        upstream: mock.upstream_config(),
        ..Config::default()
    };
    let app = molquery_server::build_app(&config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/mcp", addr)
}

async fn run(endpoint: &str, stdin: &str) -> (SessionOutcome, String) {
    let client = McpClient::new(endpoint).unwrap();
    let init = client.initialize().await.unwrap();
    assert_eq!(init.server_info.name, "ChEMBL_MCP");

    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    let outcome = run_session(&client, &ClientConfig::default(), &mut input, &mut out)
        .await
        .unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_search_select_and_show_details() {
    let mock = MockChembl::start().await;
    mock.mount_search(fixtures::page("molecules", vec![fixtures::imatinib()]))
        .await;
    mock.mount_molecule("CHEMBL941", fixtures::imatinib()).await;
    mock.mount_mechanisms("CHEMBL941", fixtures::imatinib_mechanisms()).await;
    mock.mount_indications("CHEMBL941", fixtures::imatinib_indications()).await;
    let endpoint = spawn_server(&mock).await;

    let (outcome, text) = run(&endpoint, "imatinib\n\n").await;

    assert_eq!(outcome, SessionOutcome::Shown { chembl_id: "CHEMBL941".into() });
    assert!(text.contains("Available tools: get_molecule_details, search_molecules"));
    assert!(text.contains("1. IMATINIB | id=CHEMBL941"));
    assert!(text.contains("ChEMBL ID:   CHEMBL941"));
    assert!(text.contains("Mechanisms (up to 5):"));
    assert!(text.contains("Indications (up to 5):"));
}

#[tokio::test]
async fn test_upstream_failure_ends_with_no_hits() {
    let mock = MockChembl::start().await;
    mock.mount_search_status(500).await;
    let endpoint = spawn_server(&mock).await;

    let (outcome, text) = run(&endpoint, "imatinib\n").await;

    assert_eq!(outcome, SessionOutcome::NoHits);
    assert!(text.contains("Search error:"));
    assert!(text.contains("No molecules found."));
}

#[tokio::test]
async fn test_missing_details_message() {
    let mock = MockChembl::start().await;
    mock.mount_search(fixtures::page("molecules", vec![fixtures::imatinib()]))
        .await;
    mock.mount_molecule_status("CHEMBL941", 404).await;
    let endpoint = spawn_server(&mock).await;

    let (outcome, text) = run(&endpoint, "imatinib\n1\n").await;

    assert_eq!(outcome, SessionOutcome::NoDetails { chembl_id: "CHEMBL941".into() });
    assert!(text.contains("No details returned."));
}
