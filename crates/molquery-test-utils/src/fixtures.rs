//! ChEMBL-shaped JSON fixtures.

use serde_json::{json, Value};

/// A molecule record as served by `/molecule/{id}` and inside search pages.
pub fn molecule(chembl_id: &str, pref_name: &str, max_phase: Value) -> Value {
    json!({
        "molecule_chembl_id": chembl_id,
        "pref_name": pref_name,
        "molecule_type": "Small molecule",
        "max_phase": max_phase,
        "molecule_structures": {
            "canonical_smiles": format!("C-{}", chembl_id),
            "standard_inchi_key": format!("{}-INCHIKEY", chembl_id),
            "molfile": "\n     RDKit          2D\n"
        },
        "molecule_properties": { "full_mwt": "493.62", "alogp": "4.59" },
        "first_approval": 2001,
        "oral": true
    })
}

pub fn imatinib() -> Value {
    json!({
        "molecule_chembl_id": "CHEMBL941",
        "pref_name": "IMATINIB",
        "molecule_type": "Small molecule",
        "max_phase": "4.0",
        "molecule_structures": {
            "canonical_smiles": "Cc1ccc(NC(=O)c2ccc(CN3CCN(C)CC3)cc2)cc1Nc1nccc(-c2cccnc2)n1",
            "standard_inchi_key": "KTUFNOKKBVMGRW-UHFFFAOYSA-N"
        }
    })
}

/// A page under `root_key` with ChEMBL's pagination metadata.
pub fn page(root_key: &str, items: Vec<Value>) -> Value {
    let count = items.len();
    json!({
        "page_meta": {
            "limit": count,
            "next": null,
            "offset": 0,
            "previous": null,
            "total_count": count
        },
        root_key: items
    })
}

/// `n` molecules with identifiers `CHEMBL1..=CHEMBLn`.
pub fn numbered_molecules(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| molecule(&format!("CHEMBL{}", i), &format!("MOLECULE {}", i), json!(i % 5)))
        .collect()
}

pub fn mechanism(moa: &str, target_name: Option<&str>, target_chembl_id: &str) -> Value {
    json!({
        "action_type": "INHIBITOR",
        "mechanism_of_action": moa,
        "target_name": target_name,
        "target_chembl_id": target_chembl_id,
        "molecule_chembl_id": "CHEMBL941",
        "direct_interaction": true
    })
}

pub fn indication(efo_id: &str, efo_term: Option<&str>, mesh_id: &str, mesh_heading: &str) -> Value {
    json!({
        "drugind_id": 22632,
        "efo_id": efo_id,
        "efo_term": efo_term,
        "mesh_id": mesh_id,
        "mesh_heading": mesh_heading,
        "max_phase_for_ind": "4.0",
        "molecule_chembl_id": "CHEMBL941"
    })
}

/// Two mechanisms for imatinib.
pub fn imatinib_mechanisms() -> Value {
    page(
        "mechanisms",
        vec![
            mechanism("Bcr/Abl fusion protein inhibitor", Some("Bcr/Abl fusion protein"), "CHEMBL1862"),
            mechanism("Stem cell growth factor receptor inhibitor", None, "CHEMBL1936"),
        ],
    )
}

pub fn imatinib_indications() -> Value {
    page(
        "drug_indications",
        vec![
            indication("EFO:0000339", Some("chronic myelogenous leukemia"), "D015464", "Leukemia, Myelogenous, Chronic, BCR-ABL Positive"),
            indication("EFO:0000180", None, "D046152", "Gastrointestinal Stromal Tumors"),
        ],
    )
}

pub fn error_body(status: u16) -> Value {
    json!({ "error_message": format!("upstream returned {}", status) })
}
