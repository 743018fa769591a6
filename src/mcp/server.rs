//! MCP server implementation.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::*;
use crate::mcp::transport::{Message, Transport};
use crate::metrics::Metrics;

/// MCP server.
pub struct McpServer {
    handler: Arc<McpHandler>,
    metrics: Arc<Metrics>,
    name: String,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(handler: Arc<McpHandler>, metrics: Arc<Metrics>, name: impl Into<String>) -> Self {
        Self {
            handler,
            metrics,
            name: name.into(),
        }
    }

    /// Run the server until the transport closes.
    pub async fn run<T: Transport>(&self, mut transport: T) -> Result<()> {
        info!("Starting MCP server: {} v{}", self.name, crate::VERSION);

        let (mut incoming, outgoing) = transport.start().await?;

        while let Some(msg) = incoming.recv().await {
            match msg {
                Message::Request(req) => {
                    let response = self.handle_request(req).await;
                    if outgoing.send(Message::Response(response)).await.is_err() {
                        error!("Failed to send response");
                        break;
                    }
                }
                Message::Notification(notif) => {
                    debug!("Notification: {}", notif.method);
                    if notif.method == "notifications/initialized" {
                        info!("Client initialized");
                    }
                }
                Message::Response(_) => {
                    warn!("Received unexpected response");
                }
            }
        }

        // Release our sender so the writer drains and exits.
        drop(outgoing);
        transport.stop().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle a JSON-RPC request.
    pub async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling request: {} (id: {:?})", req.method, req.id);
        self.metrics.inc_requests();

        let result = match req.method.as_str() {
            "initialize" => serde_json::to_value(InitializeResult::for_server(&self.name))
                .map_err(Error::from),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => serde_json::to_value(ListToolsResult {
                tools: self.handler.list_tools(),
            })
            .map_err(Error::from),
            "tools/call" => self.handle_call_tool(req.params).await,
            _ => Err(Error::McpProtocol(format!("Unknown method: {}", req.method))),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(req.id, value),
            Err(e) => {
                self.metrics.inc_failed();
                warn!("Request {} failed: {}", req.method, e);
                JsonRpcResponse::failure(req.id, error_code(&e), e.to_string())
            }
        }
    }

    /// Handle call tool request.
    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolParams = params
            .ok_or_else(|| Error::InvalidToolArguments("Missing params".to_string()))
            .and_then(|v| {
                serde_json::from_value(v).map_err(|e| Error::InvalidToolArguments(e.to_string()))
            })?;

        let handler = self
            .handler
            .get_tool(&params.name)
            .ok_or_else(|| Error::ToolNotFound(params.name.clone()))?;

        self.metrics.inc_tool_calls();
        let result = handler.execute(params.arguments).await?;
        if result.is_error {
            self.metrics.inc_failed();
        }
        Ok(serde_json::to_value(result)?)
    }
}

/// JSON-RPC error code for a failed request.
fn error_code(err: &Error) -> i32 {
    match err {
        Error::McpProtocol(_) => error_codes::METHOD_NOT_FOUND,
        e if e.is_caller_error() => error_codes::INVALID_PARAMS,
        _ => error_codes::INTERNAL_ERROR,
    }
}
