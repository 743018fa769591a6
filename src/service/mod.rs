//! Service layer for the context assembler.
//!
//! Sits between the MCP tools and the pure engine: decodes packages at the
//! boundary, resolves the reference time, and records metrics.

pub mod assembler;
pub mod loader;

pub use assembler::AssemblerService;
pub use loader::{load_package, parse_package, PackageFormat};
