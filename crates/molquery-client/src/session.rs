//! One interactive lookup: query, pick a hit, show its details.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use molquery_common::config::ClientConfig;
use molquery_common::Result;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{extract, render};

/// Anything that can list and invoke tools. Implemented by [`crate::McpClient`].
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn tool_names(&self) -> Result<Vec<String>>;

    /// Invokes a tool and returns its `{result, error?}` envelope.
    async fn invoke(&self, name: &str, arguments: Value) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    NoHits,
    MissingIdentifier,
    NoDetails { chembl_id: String },
    Shown { chembl_id: String },
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<String> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    // EOF reads as an empty answer
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub async fn run_session<T, R, W>(
    invoker: &T,
    config: &ClientConfig,
    input: &mut R,
    out: &mut W,
) -> Result<SessionOutcome>
where
    T: ToolInvoker + ?Sized,
    R: BufRead,
    W: Write,
{
    let query = prompt(
        input,
        out,
        "Enter a ChEMBL query (e.g. 'imatinib', 'EGFR inhibitor')\n> ",
    )?;

    let tools = invoker.tool_names().await?;
    writeln!(out, "\nAvailable tools: {}", tools.join(", "))?;

    debug!(query = %query, limit = config.search_limit, "Searching");
    let search = invoker
        .invoke("search_molecules", json!({ "q": query, "limit": config.search_limit }))
        .await?;
    if let Some(err) = extract::error_of(&search) {
        warn!("search_molecules reported an error: {}", err);
        writeln!(out, "Search error: {}", err)?;
    }

    let hits = extract::hits(&search);
    if hits.is_empty() {
        writeln!(out, "No molecules found.")?;
        return Ok(SessionOutcome::NoHits);
    }

    writeln!(out, "\nChEMBL results:")?;
    write!(out, "{}", render::hit_list(&hits))?;

    let answer = prompt(input, out, "\nWhich number should be shown in detail? (Enter for 1)\n> ")?;
    let selected = &hits[render::parse_selection(&answer, hits.len()) - 1];

    let chembl_id = match selected.chembl_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            writeln!(out, "The selected result has no ChEMBL ID.")?;
            return Ok(SessionOutcome::MissingIdentifier);
        }
    };

    writeln!(out, "\nFetching details for {} ...\n", chembl_id)?;
    let lookup = invoker
        .invoke("get_molecule_details", json!({ "chembl_id": chembl_id }))
        .await?;
    if let Some(err) = extract::error_of(&lookup) {
        warn!("get_molecule_details reported an error: {}", err);
        writeln!(out, "Details error: {}", err)?;
    }

    let Some(detail) = extract::details(&lookup) else {
        writeln!(out, "No details returned.")?;
        return Ok(SessionOutcome::NoDetails { chembl_id });
    };

    write!(out, "{}", render::detail_block(&detail, config.max_listed))?;
    Ok(SessionOutcome::Shown { chembl_id })
}
