//! Pulls the `{result, error?}` envelope out of a tool call result.

use molquery_chembl::{MoleculeDetail, MoleculeSummary};
use molquery_common::protocol::ToolCallResult;
use serde_json::{json, Value};

/// Prefers `structuredContent`; otherwise parses the first text block.
/// A text document without a `result` key is treated as the result itself.
pub fn envelope(call: &ToolCallResult) -> Value {
    if let Some(structured) = &call.structured_content {
        if structured.get("result").is_some() {
            return structured.clone();
        }
    }

    let parsed = call
        .content
        .iter()
        .find(|c| c.content_type == "text")
        .and_then(|c| serde_json::from_str::<Value>(&c.text).ok());

    match parsed {
        Some(doc) if doc.get("result").is_some() => doc,
        Some(doc) => json!({ "result": doc }),
        None => json!({ "result": Value::Null }),
    }
}

pub fn error_of(envelope: &Value) -> Option<&str> {
    envelope.get("error").and_then(Value::as_str)
}

/// Search hits in order. Entries that are not molecule objects are skipped.
pub fn hits(envelope: &Value) -> Vec<MoleculeSummary> {
    envelope
        .get("result")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// `None` for a null, empty or non-object result.
pub fn details(envelope: &Value) -> Option<MoleculeDetail> {
    match envelope.get("result") {
        Some(Value::Object(map)) if !map.is_empty() => {
            serde_json::from_value(Value::Object(map.clone())).ok()
        }
        _ => None,
    }
}
