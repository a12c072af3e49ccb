pub mod mcp;
pub mod system;
