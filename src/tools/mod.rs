//! MCP tool implementations.
//!
//! - `context` - full document assembly and single-section rendering
//! - `search` - search query derivation and result formatting

pub mod context;
pub mod search;

use std::sync::Arc;

use crate::mcp::handler::McpHandler;
use crate::service::AssemblerService;

/// Register all tools with the handler.
pub fn register_all_tools(handler: &mut McpHandler, service: Arc<AssemblerService>) {
    handler.register(context::AssembleContextTool::new(service.clone()));
    handler.register(context::RenderSectionTool::new(service.clone()));
    handler.register(search::DeriveSearchQueriesTool::new(service.clone()));
    handler.register(search::FormatSearchResultsTool::new(service));
}
