//! ChEMBL API client.
//!
//! ChEMBL is a database of bioactive molecules with drug-like properties.
//! This client covers the read-only slice the lookup service needs:
//!   - `/molecule/search`   free-text molecule search
//!   - `/molecule/{id}`     single molecule record
//!   - `/mechanism`         mechanisms of action, filtered by molecule
//!   - `/drug_indication`   indications, filtered by molecule
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data
//!
//! Calls are issued one at a time and never retried. Every call goes through
//! the allowlisted [`SandboxClient`], which also applies the upstream timeout
//! and the `Accept: application/json` header.

use async_trait::async_trait;
use molquery_common::config::UpstreamConfig;
use molquery_common::{MolqueryError, Result, SandboxClient};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::models::{Lookup, MoleculeDetail, MoleculeSummary};
use crate::normalise;
use crate::source::MoleculeSource;

/// ChEMBL client for molecule search and detail lookups.
#[derive(Debug, Clone)]
pub struct ChemblClient {
    http: SandboxClient,
    base: Url,
    related_page_size: u32,
}

impl ChemblClient {
    pub fn new(upstream: &UpstreamConfig) -> Result<Self> {
        let base = Url::parse(&upstream.base_url)?;
        if base.cannot_be_a_base() {
            return Err(MolqueryError::Config(format!(
                "Upstream URL cannot be a base: {}",
                upstream.base_url
            )));
        }

        Ok(Self {
            http: SandboxClient::new(upstream)?,
            base,
            related_page_size: upstream.related_page_size,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                MolqueryError::Config(format!("Upstream URL cannot be a base: {}", self.base))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn fetch_json(&self, url: Url, query: &[(&str, &str)]) -> Result<Value> {
        let request = self.http.get(url)?.query(query);
        let resp = self.http.send(request).await?.error_for_status()?;

        Ok(resp.json::<Value>().await?)
    }

    /// Search molecules by free text. Returns at most `limit` hits.
    #[instrument(skip(self))]
    pub async fn search_molecules(&self, query: &str, limit: usize) -> Result<Vec<MoleculeSummary>> {
        if limit == 0 {
            return Err(MolqueryError::InvalidInput("limit must be at least 1".to_string()));
        }

        let url = self.endpoint(&["molecule", "search"])?;
        let limit_str = limit.to_string();

        debug!(query, limit, "Searching ChEMBL molecules");

        let params = [
            ("q", query),
            ("limit", limit_str.as_str()),
            ("page_size", limit_str.as_str()),
        ];
        let body = self.fetch_json(url, &params).await?;

        let hits = normalise::search_hits(&body, limit);
        info!(query, hits = hits.len(), "ChEMBL search complete");
        Ok(hits)
    }

    /// Fetch a molecule with its mechanisms and indications.
    ///
    /// Only the molecule record is mandatory. A failed mechanism or
    /// indication call leaves that collection empty.
    #[instrument(skip(self))]
    pub async fn fetch_details(&self, chembl_id: &str) -> Result<MoleculeDetail> {
        let chembl_id = chembl_id.trim();
        if chembl_id.is_empty() {
            return Err(MolqueryError::InvalidInput("chembl_id must not be empty".to_string()));
        }

        debug!(chembl_id, "Fetching ChEMBL molecule");
        let url = self.endpoint(&["molecule", chembl_id])?;
        let record = self.fetch_json(url, &[]).await?;

        let molecule = MoleculeSummary::from_detail_record(&record, chembl_id);

        let mechanisms = match self.fetch_related("mechanism", chembl_id).await {
            Ok(body) => normalise::mechanisms(&body),
            Err(e) => {
                warn!(chembl_id, error = %e, "Mechanism lookup failed, continuing without mechanisms");
                Vec::new()
            }
        };

        let indications = match self.fetch_related("drug_indication", chembl_id).await {
            Ok(body) => normalise::indications(&body),
            Err(e) => {
                warn!(chembl_id, error = %e, "Indication lookup failed, continuing without indications");
                Vec::new()
            }
        };

        info!(
            chembl_id,
            mechanisms = mechanisms.len(),
            indications = indications.len(),
            "ChEMBL details complete"
        );

        Ok(MoleculeDetail { molecule, mechanisms, indications })
    }

    /// One page of a molecule-filtered collection endpoint.
    async fn fetch_related(&self, resource: &str, chembl_id: &str) -> Result<Value> {
        let url = self.endpoint(&[resource])?;
        let page = self.related_page_size.to_string();

        let params = [
            ("molecule_chembl_id", chembl_id),
            ("limit", page.as_str()),
            ("page_size", page.as_str()),
        ];
        self.fetch_json(url, &params).await
    }
}

#[async_trait]
impl MoleculeSource for ChemblClient {
    async fn search(&self, query: &str, limit: usize) -> Lookup<Vec<MoleculeSummary>> {
        let res = self.search_molecules(query, limit).await;
        if let Err(ref e) = res {
            warn!(query, error = %e, "ChEMBL search failed");
        }
        Lookup::from_result(res, Vec::new())
    }

    async fn get_details(&self, chembl_id: &str) -> Lookup<Option<MoleculeDetail>> {
        match self.fetch_details(chembl_id).await {
            Ok(detail) => Lookup::ok(Some(detail)),
            Err(e) => {
                warn!(chembl_id, error = %e, "ChEMBL detail lookup failed");
                Lookup::failed(None, e)
            }
        }
    }
}
