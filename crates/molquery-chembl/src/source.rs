use async_trait::async_trait;

use crate::models::{Lookup, MoleculeDetail, MoleculeSummary};

/// Common interface for molecule lookup backends.
///
/// Implementations contain their own failures: a broken upstream yields an
/// empty result with `error` set, never an `Err` or a panic.
#[async_trait]
pub trait MoleculeSource: Send + Sync {
    /// Free-text molecule search, at most `limit` hits in upstream order.
    async fn search(&self, query: &str, limit: usize) -> Lookup<Vec<MoleculeSummary>>;

    /// Molecule record with mechanisms and indications. `result` is `None`
    /// when the molecule itself could not be fetched.
    async fn get_details(&self, chembl_id: &str) -> Lookup<Option<MoleculeDetail>>;
}
