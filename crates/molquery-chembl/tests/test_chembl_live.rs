//! Lookups against the public ChEMBL API.
//!
//! Run with: cargo test --package molquery-chembl --test test_chembl_live -- --ignored --nocapture

use molquery_chembl::{ChemblClient, MoleculeSource};
use molquery_common::config::UpstreamConfig;

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_search_imatinib() {
    let client = ChemblClient::new(&UpstreamConfig::default()).unwrap();

    let lookup = client.search("imatinib", 5).await;
    assert!(lookup.is_ok(), "search failed: {:?}", lookup.error);

    println!("Found {} molecules", lookup.result.len());
    for hit in &lookup.result {
        println!("{:?} | {:?} | phase={:?}", hit.chembl_id, hit.pref_name, hit.max_phase);
    }

    assert!(!lookup.result.is_empty(), "Should find at least one molecule");
    assert!(lookup.result.len() <= 5);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_details_imatinib() {
    let client = ChemblClient::new(&UpstreamConfig::default()).unwrap();

    let lookup = client.get_details("CHEMBL941").await;
    let detail = lookup.result.expect("CHEMBL941 should resolve");

    println!("{:#?}", detail.molecule);
    println!("{} mechanisms, {} indications", detail.mechanisms.len(), detail.indications.len());

    assert_eq!(detail.molecule.chembl_id.as_deref(), Some("CHEMBL941"));
    assert!(!detail.mechanisms.is_empty());
}
