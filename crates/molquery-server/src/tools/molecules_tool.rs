use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use molquery_chembl::{Lookup, MoleculeSource};
use serde_json::{json, Value};

use super::{MolqueryTool, ToolOutput};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Reads an optional positive integer argument, accepting `5` and `"5"`.
fn positive_int_arg(params: &Value, key: &str, default: usize) -> Result<usize, String> {
    let invalid = || format!("'{key}' must be a positive integer");
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_u64()
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .ok_or_else(invalid),
        Some(Value::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

fn string_arg<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Missing required parameter: {key}"))
}

/// Free-text molecule search.
pub struct SearchMoleculesTool {
    source: Arc<dyn MoleculeSource>,
}

impl SearchMoleculesTool {
    pub fn new(source: Arc<dyn MoleculeSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MolqueryTool for SearchMoleculesTool {
    fn name(&self) -> &str {
        "search_molecules"
    }

    fn description(&self) -> &str {
        "Search ChEMBL molecules by free-text query (name, synonym or keyword). \
         Returns up to `limit` summaries with ChEMBL ID, preferred name, type, \
         max clinical phase, canonical SMILES and InChIKey."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "Free-text query, e.g. 'imatinib' or 'EGFR inhibitor'."
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "default": DEFAULT_SEARCH_LIMIT,
                    "description": "Maximum number of hits to return."
                }
            },
            "required": ["q"]
        })
    }

    async fn invoke(&self, params: Value) -> ToolOutput {
        let start = Instant::now();
        let query = match string_arg(&params, "q") {
            Ok(q) => q,
            Err(e) => return ToolOutput::failure(json!([]), e, start),
        };
        let limit = match positive_int_arg(&params, "limit", DEFAULT_SEARCH_LIMIT) {
            Ok(limit) => limit,
            Err(e) => return ToolOutput::failure(json!([]), e, start),
        };

        let lookup = self.source.search(query, limit).await;
        ToolOutput::from_lookup(&lookup, start)
    }
}

/// Molecule record plus mechanisms and indications.
pub struct GetMoleculeDetailsTool {
    source: Arc<dyn MoleculeSource>,
}

impl GetMoleculeDetailsTool {
    pub fn new(source: Arc<dyn MoleculeSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MolqueryTool for GetMoleculeDetailsTool {
    fn name(&self) -> &str {
        "get_molecule_details"
    }

    fn description(&self) -> &str {
        "Fetch detailed information for a molecule by ChEMBL ID, including \
         mechanisms of action and drug indications."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "chembl_id": {
                    "type": "string",
                    "description": "ChEMBL molecule identifier, e.g. 'CHEMBL941'."
                }
            },
            "required": ["chembl_id"]
        })
    }

    async fn invoke(&self, params: Value) -> ToolOutput {
        let start = Instant::now();
        let chembl_id = match string_arg(&params, "chembl_id") {
            Ok(id) => id,
            Err(e) => return ToolOutput::failure(json!({}), e, start),
        };

        let lookup = self.source.get_details(chembl_id).await;

        // A missing molecule is reported as `{}`, not `null`
        let result = match lookup.result {
            Some(detail) => serde_json::to_value(detail).unwrap_or_else(|_| json!({})),
            None => json!({}),
        };
        ToolOutput::from_lookup(&Lookup { result, error: lookup.error }, start)
    }
}
