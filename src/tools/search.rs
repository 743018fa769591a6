//! Search query derivation and result formatting tools.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mcp::handler::{error_result, get_object_arg, get_string_arg, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};
use crate::service::AssemblerService;
use crate::types::{SearchResults, TaskType};

/// Derive web, code and library queries from a task.
pub struct DeriveSearchQueriesTool {
    service: Arc<AssemblerService>,
}

impl DeriveSearchQueriesTool {
    pub fn new(service: Arc<AssemblerService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for DeriveSearchQueriesTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "derive_search_queries".to_string(),
            description: "Derive a web search query, a code search query and a list of library names from the task type and user input.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "task_type": {
                        "type": "string",
                        "description": "Task type code: architecture, feature, bugfix, refactor, decision, progress or general"
                    },
                    "user_input": {
                        "type": "string",
                        "description": "The user's request"
                    }
                },
                "required": ["task_type", "user_input"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let task_type = TaskType::from(get_string_arg(&args, "task_type")?);
        let user_input = get_string_arg(&args, "user_input")?;

        let queries = self.service.derive_queries(&task_type, &user_input);
        Ok(success_result(serde_json::to_string_pretty(&queries)?))
    }
}

/// Render retrieved external search results as markdown.
pub struct FormatSearchResultsTool {
    service: Arc<AssemblerService>,
}

impl FormatSearchResultsTool {
    pub fn new(service: Arc<AssemblerService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for FormatSearchResultsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "format_search_results".to_string(),
            description: "Render web, code and library search results into a markdown section, capped and summarized.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "results": {
                        "type": "object",
                        "description": "Search results with optional 'web', 'code' and 'library' arrays",
                        "properties": {
                            "web": { "type": "array" },
                            "code": { "type": "array" },
                            "library": { "type": "array" }
                        }
                    }
                },
                "required": ["results"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let raw = get_object_arg(&args, "results")?;

        let results: SearchResults = match serde_json::from_value(raw) {
            Ok(results) => results,
            Err(e) => {
                let err = Error::InvalidToolArguments(format!("Malformed search results: {}", e));
                return Ok(error_result(err.to_string()));
            }
        };

        Ok(success_result(self.service.format_search_results(&results)))
    }
}
