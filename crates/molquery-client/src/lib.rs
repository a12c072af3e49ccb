//! molquery-client: interactive client for the molquery tool server.
//!
//! Asks for a query, runs `search_molecules`, lets the user pick a hit and
//! prints `get_molecule_details` for it.

pub mod extract;
pub mod render;
pub mod rpc;
pub mod session;

pub use rpc::McpClient;
pub use session::{run_session, SessionOutcome, ToolInvoker};
