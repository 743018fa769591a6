//! Model Context Protocol (MCP) implementation.
//!
//! - `protocol` - JSON-RPC and MCP message types
//! - `server` - request dispatch
//! - `transport` - newline-delimited stdio transport
//! - `handler` - tool trait, registry and argument helpers

pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

pub use handler::McpHandler;
pub use protocol::*;
pub use server::McpServer;
pub use transport::{StdioTransport, Transport};
