//! molquery-chembl: ChEMBL lookup service.
//!
//! Maps free-text queries and ChEMBL identifiers onto the public ChEMBL REST
//! API and normalises its loosely-shaped JSON into fixed record types:
//!   - `search`: one call to `/molecule/search`, truncated to the caller's limit
//!   - `get_details`: the molecule record plus its mechanisms and indications
//!
//! Failures never escape as errors at this level; they come back as a
//! [`Lookup`] carrying an empty result and an error message.

pub mod client;
pub mod models;
pub mod normalise;
pub mod source;

pub use client::ChemblClient;
pub use models::{Indication, Lookup, Mechanism, MoleculeDetail, MoleculeSummary};
pub use source::MoleculeSource;
