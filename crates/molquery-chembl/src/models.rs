//! Normalised record types returned by the lookup service.
//!
//! Every upstream-derived field is optional: ChEMBL omits fields freely and a
//! missing value is reported as `null`, never as an empty-string sentinel.

use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoleculeSummary {
    pub chembl_id: Option<String>,
    pub pref_name: Option<String>,
    pub molecule_type: Option<String>,
    pub max_phase: Option<f64>, // Clinical trial phase, 0-4 (0.5 = early phase 1)
    pub canonical_smiles: Option<String>,
    pub inchi_key: Option<String>,
}

/// A drug's mode of action against a target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub mechanism_of_action: Option<String>,
    pub target_name: Option<String>,
    pub target_chembl_id: Option<String>,
}

/// A condition the drug is approved or investigated for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indication {
    pub efo_id: Option<String>,
    pub efo_term: Option<String>,
    pub mesh_id: Option<String>,
    pub mesh_heading: Option<String>,
}

/// Full molecule record: summary fields plus related collections, in
/// upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoleculeDetail {
    #[serde(flatten)]
    pub molecule: MoleculeSummary,
    #[serde(default)]
    pub mechanisms: Vec<Mechanism>,
    #[serde(default)]
    pub indications: Vec<Indication>,
}

/// Result envelope that crosses the tool boundary.
///
/// A failed lookup still carries a `result` (empty) alongside `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup<T> {
    pub result: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Lookup<T> {
    pub fn ok(result: T) -> Self {
        Self { result, error: None }
    }

    pub fn failed(result: T, error: impl ToString) -> Self {
        Self { result, error: Some(error.to_string()) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Builds from a fallible call, substituting `empty` on error.
    pub fn from_result<E: ToString>(res: Result<T, E>, empty: T) -> Self {
        match res {
            Ok(result) => Self::ok(result),
            Err(e) => Self::failed(empty, e),
        }
    }
}
