//! Plain-text rendering for the interactive session.

use std::fmt::Write;

use molquery_chembl::{Indication, Mechanism, MoleculeDetail, MoleculeSummary};

const MISSING: &str = "—";

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

/// `4.0` renders as `4`, `0.5` as `0.5`.
pub fn phase(value: Option<f64>) -> String {
    match value {
        Some(p) if p.fract() == 0.0 => format!("{}", p as i64),
        Some(p) => p.to_string(),
        None => MISSING.to_string(),
    }
}

/// Numbered hit list, 1-indexed.
pub fn hit_list(hits: &[MoleculeSummary]) -> String {
    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | id={} | type={} | phase={}",
            i + 1,
            or_missing(hit.pref_name.as_deref()),
            or_missing(hit.chembl_id.as_deref()),
            or_missing(hit.molecule_type.as_deref()),
            phase(hit.max_phase),
        );
    }
    out
}

pub fn mechanism_line(m: &Mechanism) -> String {
    let target = m
        .target_name
        .as_deref()
        .or(m.target_chembl_id.as_deref());
    format!(
        "  • {} (target: {})",
        or_missing(m.mechanism_of_action.as_deref()),
        or_missing(target)
    )
}

pub fn indication_line(i: &Indication) -> String {
    format!(
        "  • {}",
        or_missing(i.efo_term.as_deref().or(i.mesh_heading.as_deref()))
    )
}

/// Detail block with at most `max_listed` mechanisms and indications.
/// Empty sections are left out.
pub fn detail_block(detail: &MoleculeDetail, max_listed: usize) -> String {
    let m = &detail.molecule;
    let mut out = String::new();

    let _ = writeln!(out, "Details:");
    let _ = writeln!(out, "  ChEMBL ID:   {}", or_missing(m.chembl_id.as_deref()));
    let _ = writeln!(out, "  Name:        {}", or_missing(m.pref_name.as_deref()));
    let _ = writeln!(out, "  Type:        {}", or_missing(m.molecule_type.as_deref()));
    let _ = writeln!(out, "  Max phase:   {}", phase(m.max_phase));

    if !detail.mechanisms.is_empty() {
        let _ = writeln!(out, "\nMechanisms (up to {}):", max_listed);
        for mech in detail.mechanisms.iter().take(max_listed) {
            let _ = writeln!(out, "{}", mechanism_line(mech));
        }
    }

    if !detail.indications.is_empty() {
        let _ = writeln!(out, "\nIndications (up to {}):", max_listed);
        for ind in detail.indications.iter().take(max_listed) {
            let _ = writeln!(out, "{}", indication_line(ind));
        }
    }

    out
}

/// 1-based selection. Blank or non-numeric input picks the first hit;
/// numbers are clamped to `1..=len`.
pub fn parse_selection(input: &str, len: usize) -> usize {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return 1;
    }
    let n = trimmed.parse::<usize>().unwrap_or(usize::MAX);
    n.clamp(1, len.max(1))
}
