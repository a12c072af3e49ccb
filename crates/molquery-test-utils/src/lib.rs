//! Shared testing utilities for molquery.
//!
//! - [`fixtures`]: ChEMBL-shaped JSON bodies
//! - [`MockChembl`]: a wiremock server that answers like the ChEMBL REST API

pub mod fixtures;

use molquery_common::config::UpstreamConfig;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path prefix the mock serves under, mirroring the public API layout.
pub const API_PREFIX: &str = "/chembl/api/data";

pub struct MockChembl {
    server: MockServer,
}

impl MockChembl {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), API_PREFIX)
    }

    /// Upstream settings pointing at this mock, with a short timeout.
    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.base_url(),
            timeout_secs: 5,
            ..UpstreamConfig::default()
        }
    }

    async fn mount_json(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", API_PREFIX, route)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_search(&self, body: Value) {
        self.mount_json("/molecule/search", 200, body).await;
    }

    pub async fn mount_search_status(&self, status: u16) {
        self.mount_json("/molecule/search", status, fixtures::error_body(status)).await;
    }

    pub async fn mount_molecule(&self, chembl_id: &str, body: Value) {
        self.mount_json(&format!("/molecule/{}", chembl_id), 200, body).await;
    }

    pub async fn mount_molecule_status(&self, chembl_id: &str, status: u16) {
        self.mount_json(&format!("/molecule/{}", chembl_id), status, fixtures::error_body(status))
            .await;
    }

    pub async fn mount_mechanisms(&self, chembl_id: &str, body: Value) {
        self.mount_related("/mechanism", chembl_id, 200, body).await;
    }

    pub async fn mount_mechanisms_status(&self, chembl_id: &str, status: u16) {
        self.mount_related("/mechanism", chembl_id, status, fixtures::error_body(status))
            .await;
    }

    pub async fn mount_indications(&self, chembl_id: &str, body: Value) {
        self.mount_related("/drug_indication", chembl_id, 200, body).await;
    }

    pub async fn mount_indications_status(&self, chembl_id: &str, status: u16) {
        self.mount_related("/drug_indication", chembl_id, status, fixtures::error_body(status))
            .await;
    }

    async fn mount_related(&self, route: &str, chembl_id: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", API_PREFIX, route)))
            .and(query_param("molecule_chembl_id", chembl_id))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serves a body that is not JSON, for decode-failure tests.
    pub async fn mount_garbage(&self, route: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", API_PREFIX, route)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&self.server)
            .await;
    }

    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Paths of received requests, relative to [`API_PREFIX`], in order.
    pub async fn received_paths(&self) -> Vec<String> {
        self.received()
            .await
            .iter()
            .map(|r| r.url.path().trim_start_matches(API_PREFIX).to_string())
            .collect()
    }
}
