//! Context assembly tools.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::Section;
use crate::error::Result;
use crate::mcp::handler::{
    error_result, get_object_arg, get_optional_string_arg, get_string_arg, success_result,
    ToolHandler,
};
use crate::mcp::protocol::{Tool, ToolResult};
use crate::service::AssemblerService;

fn package_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "description": "Context package: taskType is required; all other fields (priority, userInput, systemInstructions, projectContext, longTermMemory, relevantKnowledge, relatedPatterns, availableTools, shortTermMemory, completenessScore, ...) are optional"
    })
}

fn now_schema() -> Value {
    serde_json::json!({
        "type": "string",
        "description": "Reference time for relative timestamps (RFC 3339). Defaults to the server's reference time."
    })
}

/// Assemble the full context document.
pub struct AssembleContextTool {
    service: Arc<AssemblerService>,
}

impl AssembleContextTool {
    pub fn new(service: Arc<AssemblerService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for AssembleContextTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "assemble_context".to_string(),
            description: "Render a context package into a single markdown document with header, task, project, preferences, knowledge, patterns, tools, history and quality sections.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "package": package_schema(),
                    "now": now_schema()
                },
                "required": ["package"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let raw = get_object_arg(&args, "package")?;
        let now = get_optional_string_arg(&args, "now");

        let pkg = match self.service.decode(raw) {
            Ok(pkg) => pkg,
            Err(e) => return Ok(error_result(e.to_string())),
        };
        let now = match self.service.reference_time(now.as_deref()) {
            Ok(now) => now,
            Err(e) => return Ok(error_result(e.to_string())),
        };

        Ok(success_result(self.service.assemble(&pkg, now)))
    }
}

/// Render a single section of the document.
pub struct RenderSectionTool {
    service: Arc<AssemblerService>,
}

impl RenderSectionTool {
    pub fn new(service: Arc<AssemblerService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for RenderSectionTool {
    fn definition(&self) -> Tool {
        let sections: Vec<&str> = Section::ALL.iter().map(Section::name).collect();

        Tool {
            name: "render_section".to_string(),
            description: "Render one section of a context package, exactly as it appears in the assembled document.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "package": package_schema(),
                    "section": {
                        "type": "string",
                        "enum": sections,
                        "description": "Section to render"
                    },
                    "now": now_schema()
                },
                "required": ["package", "section"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let raw = get_object_arg(&args, "package")?;
        let section = get_string_arg(&args, "section")?;
        let now = get_optional_string_arg(&args, "now");

        let section: Section = match section.parse() {
            Ok(section) => section,
            Err(e) => return Ok(error_result(format!("{}", e))),
        };
        let pkg = match self.service.decode(raw) {
            Ok(pkg) => pkg,
            Err(e) => return Ok(error_result(e.to_string())),
        };
        let now = match self.service.reference_time(now.as_deref()) {
            Ok(now) => now,
            Err(e) => return Ok(error_result(e.to_string())),
        };

        Ok(success_result(self.service.render_section(&pkg, section, now)))
    }
}
