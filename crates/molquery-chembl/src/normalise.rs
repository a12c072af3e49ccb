//! Field resolution for ChEMBL JSON payloads.
//!
//! ChEMBL response shapes drift between API versions: the hit list of a search
//! may sit under `molecules`, `molecule` or `results`, identifiers under
//! `molecule_chembl_id` or `chembl_id`, and so on. Each target field therefore
//! has an ordered list of candidate paths, and the first candidate holding a
//! present value of the right type wins.
//!
//! "Present" means not `null`, not `""`, not `[]` and not `{}`. A candidate
//! of the wrong type reads as absent and resolution moves on.

use serde_json::Value;

use crate::models::{Indication, Mechanism, MoleculeSummary};

/// A nested key path, e.g. `["molecule_structures", "canonical_smiles"]`.
pub type FieldPath = &'static [&'static str];

pub const SEARCH_HITS: &[FieldPath] = &[&["molecules"], &["molecule"], &["results"]];
pub const MECHANISM_ITEMS: &[FieldPath] = &[&["mechanisms"], &["mechanism"], &["results"]];
pub const INDICATION_ITEMS: &[FieldPath] =
    &[&["drug_indications"], &["indications"], &["results"]];

pub const CHEMBL_ID: &[FieldPath] = &[&["molecule_chembl_id"], &["chembl_id"], &["molecule"]];
/// `/molecule/{id}` bodies only ever carry the canonical key.
pub const DETAIL_CHEMBL_ID: &[FieldPath] = &[&["molecule_chembl_id"]];
pub const PREF_NAME: &[FieldPath] = &[&["pref_name"], &["molecule_pref_name"]];
pub const MOLECULE_TYPE: &[FieldPath] = &[&["molecule_type"]];
pub const MAX_PHASE: &[FieldPath] = &[&["max_phase"]];
pub const CANONICAL_SMILES: &[FieldPath] = &[&["molecule_structures", "canonical_smiles"]];
pub const INCHI_KEY: &[FieldPath] = &[&["molecule_structures", "standard_inchi_key"]];

/// Walks `path` through nested objects.
pub fn resolve_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |cur, key| cur.as_object()?.get(*key))
}

pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// First candidate that is present and accepted by `extract`.
pub fn first_match<'a, T>(
    value: &'a Value,
    candidates: &[FieldPath],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|path| resolve_path(value, path))
        .filter(|v| is_present(v))
        .find_map(extract)
}

pub fn first_string(value: &Value, candidates: &[FieldPath]) -> Option<String> {
    first_match(value, candidates, |v| v.as_str().map(String::from))
}

/// Numbers, or strings that parse as finite numbers (`"4.0"`).
pub fn first_number(value: &Value, candidates: &[FieldPath]) -> Option<f64> {
    first_match(value, candidates, |v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|n| n.is_finite())
}

/// First non-empty array among the candidates, or an empty slice.
pub fn first_array<'a>(value: &'a Value, candidates: &[FieldPath]) -> &'a [Value] {
    first_match(value, candidates, |v| v.as_array().map(Vec::as_slice)).unwrap_or(&[])
}

impl MoleculeSummary {
    /// Normalises one search hit.
    pub fn from_record(record: &Value) -> Self {
        Self {
            chembl_id: first_string(record, CHEMBL_ID),
            pref_name: first_string(record, PREF_NAME),
            molecule_type: first_string(record, MOLECULE_TYPE),
            max_phase: first_number(record, MAX_PHASE),
            canonical_smiles: first_string(record, CANONICAL_SMILES),
            inchi_key: first_string(record, INCHI_KEY),
        }
    }

    /// Normalises a `/molecule/{id}` body. The identifier comes from
    /// `molecule_chembl_id` only, falling back to `requested_id`.
    pub fn from_detail_record(record: &Value, requested_id: &str) -> Self {
        Self {
            chembl_id: first_string(record, DETAIL_CHEMBL_ID)
                .or_else(|| Some(requested_id.to_string())),
            ..Self::from_record(record)
        }
    }
}

impl Mechanism {
    pub fn from_record(record: &Value) -> Self {
        Self {
            mechanism_of_action: first_string(record, &[&["mechanism_of_action"]]),
            target_name: first_string(record, &[&["target_name"]]),
            target_chembl_id: first_string(record, &[&["target_chembl_id"]]),
        }
    }
}

impl Indication {
    pub fn from_record(record: &Value) -> Self {
        Self {
            efo_id: first_string(record, &[&["efo_id"]]),
            efo_term: first_string(record, &[&["efo_term"]]),
            mesh_id: first_string(record, &[&["mesh_id"]]),
            mesh_heading: first_string(record, &[&["mesh_heading"]]),
        }
    }
}

/// Search hits in upstream order, truncated to `limit`.
pub fn search_hits(body: &Value, limit: usize) -> Vec<MoleculeSummary> {
    first_array(body, SEARCH_HITS)
        .iter()
        .take(limit)
        .map(MoleculeSummary::from_record)
        .collect()
}

pub fn mechanisms(body: &Value) -> Vec<Mechanism> {
    first_array(body, MECHANISM_ITEMS)
        .iter()
        .map(Mechanism::from_record)
        .collect()
}

pub fn indications(body: &Value) -> Vec<Indication> {
    first_array(body, INDICATION_ITEMS)
        .iter()
        .map(Indication::from_record)
        .collect()
}
