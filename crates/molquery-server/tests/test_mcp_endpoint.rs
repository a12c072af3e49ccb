//! JSON-RPC endpoint driven through the router, backed by a mock ChEMBL.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use molquery_common::Config;
use molquery_test_utils::{fixtures, MockChembl};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_for(mock: &MockChembl) -> Router {
    let config = Config {
        upstream: mock.upstream_config(),
        ..Config::default()
    };
    molquery_server::build_app(&config).expect("app")
}

async fn post_raw(app: &Router, body: String) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn rpc(app: &Router, method: &str, params: Value) -> Value {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params });
    let (status, bytes) = post_raw(app, body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

async fn call_tool(app: &Router, name: &str, arguments: Value) -> Value {
    let resp = rpc(app, "tools/call", json!({ "name": name, "arguments": arguments })).await;
    assert!(resp.get("error").is_none(), "unexpected rpc error: {resp}");
    resp["result"].clone()
}

#[tokio::test]
async fn test_initialize_reports_server_info() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let resp = rpc(&app, "initialize", json!({ "protocolVersion": "2025-03-26", "capabilities": {} })).await;

    assert_eq!(resp["id"], 1);
    assert_eq!(resp["result"]["serverInfo"]["name"], "ChEMBL_MCP");
    assert_eq!(resp["result"]["capabilities"]["tools"]["listChanged"], false);
    assert!(resp["result"]["instructions"].as_str().unwrap().contains("ChEMBL"));
}

#[tokio::test]
async fn test_notification_is_accepted_without_body() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let body = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
    let (status, bytes) = post_raw(&app, body.to_string()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_tools_list_has_both_operations() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let resp = rpc(&app, "tools/list", Value::Null).await;
    let tools = resp["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();

    assert_eq!(names, vec!["get_molecule_details", "search_molecules"]);
    assert_eq!(tools[1]["inputSchema"]["required"], json!(["q"]));
    assert_eq!(tools[1]["inputSchema"]["properties"]["limit"]["default"], 10);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["chembl_id"]));
}

#[tokio::test]
async fn test_search_call_returns_structured_envelope() {
    let mock = MockChembl::start().await;
    mock.mount_search(fixtures::page("molecules", fixtures::numbered_molecules(3)))
        .await;
    let app = app_for(&mock);

    let result = call_tool(&app, "search_molecules", json!({ "q": "imatinib", "limit": 10 })).await;

    let hits = result["structuredContent"]["result"].as_array().unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0]["chembl_id"], "CHEMBL1");
    assert_eq!(hits[0]["inchi_key"], "CHEMBL1-INCHIKEY");
    assert!(result["structuredContent"].get("error").is_none());
    assert!(result.get("isError").is_none());

    // Text block carries the same envelope
    let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text, result["structuredContent"]);
}

#[tokio::test]
async fn test_search_upstream_error_is_data() {
    let mock = MockChembl::start().await;
    mock.mount_search_status(502).await;
    let app = app_for(&mock);

    let result = call_tool(&app, "search_molecules", json!({ "q": "imatinib" })).await;

    assert_eq!(result["isError"], true);
    assert_eq!(result["structuredContent"]["result"], json!([]));
    assert!(!result["structuredContent"]["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_details_call_round_trip() {
    let mock = MockChembl::start().await;
    mock.mount_molecule("CHEMBL941", fixtures::imatinib()).await;
    mock.mount_mechanisms("CHEMBL941", fixtures::imatinib_mechanisms()).await;
    mock.mount_indications("CHEMBL941", fixtures::page("drug_indications", Vec::new()))
        .await;
    let app = app_for(&mock);

    let result = call_tool(&app, "get_molecule_details", json!({ "chembl_id": "CHEMBL941" })).await;
    let detail = &result["structuredContent"]["result"];

    assert_eq!(detail["chembl_id"], "CHEMBL941");
    assert_eq!(detail["pref_name"], "IMATINIB");
    assert_eq!(detail["mechanisms"].as_array().unwrap().len(), 2);
    assert_eq!(detail["indications"], json!([]));
}

#[tokio::test]
async fn test_details_missing_molecule_is_empty_object() {
    let mock = MockChembl::start().await;
    mock.mount_molecule_status("CHEMBL0", 404).await;
    let app = app_for(&mock);

    let result = call_tool(&app, "get_molecule_details", json!({ "chembl_id": "CHEMBL0" })).await;

    assert_eq!(result["isError"], true);
    assert_eq!(result["structuredContent"]["result"], json!({}));
    assert!(result["structuredContent"]["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_unknown_tool_is_error_result() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let result = call_tool(&app, "delete_everything", json!({})).await;
    assert_eq!(result["isError"], true);
    assert!(result["structuredContent"]["error"]
        .as_str()
        .unwrap()
        .contains("Unknown tool"));
}

#[tokio::test]
async fn test_protocol_errors() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let (status, bytes) = post_raw(&app, "{ not json".to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let resp: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(resp["error"]["code"], -32700);
    assert!(resp["id"].is_null());

    let (_, bytes) = post_raw(&app, json!({ "jsonrpc": "2.0", "id": 4 }).to_string()).await;
    let resp: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["id"], 4);

    let resp = rpc(&app, "resources/list", json!({})).await;
    assert_eq!(resp["error"]["code"], -32601);

    let resp = rpc(&app, "tools/call", json!({ "arguments": {} })).await;
    assert_eq!(resp["error"]["code"], -32602);

    let resp = rpc(&app, "ping", Value::Null).await;
    assert_eq!(resp["result"], json!({}));
}

#[tokio::test]
async fn test_health() {
    let mock = MockChembl::start().await;
    let app = app_for(&mock);

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tools"], 2);
}
