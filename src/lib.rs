//! Context Assembler
//!
//! Renders a structured context package (task, project metadata, user
//! preferences, ranked knowledge, code patterns, tools, recent history and a
//! quality score) into one bounded markdown document for an LLM agent, and
//! derives search queries for external retrieval.
//!
//! # Architecture
//!
//! 1. **Engine** (`engine`) - pure, deterministic formatting and query derivation
//! 2. **Service Layer** (`service`) - package loading, reference time, metrics
//! 3. **MCP Layer** (`mcp`) - JSON-RPC protocol and stdio transport
//! 4. **Tools Layer** (`tools`) - MCP tools over the service
//! 5. **HTTP** (`http`) - the same tools over axum, plus health and metrics

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod mcp;
pub mod metrics;
pub mod service;
pub mod tools;
pub mod types;

pub use error::{Error, Result};

/// Crate version reported in the MCP handshake.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
