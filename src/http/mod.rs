//! HTTP transport for the tool server.
//!
//! Exposes the same tools as the stdio transport for web-based clients, plus
//! health and Prometheus endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::*;
use crate::metrics::Metrics;

/// Requests served concurrently before callers queue.
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// HTTP server state.
#[derive(Clone)]
pub struct HttpState {
    handler: Arc<McpHandler>,
    metrics: Arc<Metrics>,
}

/// Build the router. `/metrics` is only mounted when `expose_metrics` is set.
pub fn router(handler: Arc<McpHandler>, metrics: Arc<Metrics>, expose_metrics: bool) -> Router {
    let state = HttpState { handler, metrics };

    let mut app = Router::new().route("/health", get(health_check));
    if expose_metrics {
        app = app.route("/metrics", get(prometheus_metrics));
    }

    app.route("/mcp/initialize", post(initialize))
        .route("/mcp/tools/list", get(list_tools))
        .route("/mcp/tools/call", post(call_tool))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(CompressionLayer::new())
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(
    config: &Config,
    handler: Arc<McpHandler>,
    metrics: Arc<Metrics>,
) -> Result<()> {
    let app = router(handler, metrics, config.metrics);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::HttpServer(format!("failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::HttpServer(e.to_string()))?;

    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Prometheus text endpoint.
async fn prometheus_metrics(State(state): State<HttpState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}

/// Initialize endpoint.
async fn initialize(State(state): State<HttpState>) -> impl IntoResponse {
    state.metrics.inc_requests();
    Json(InitializeResult::for_server("context-assembler"))
}

/// List tools endpoint.
async fn list_tools(State(state): State<HttpState>) -> impl IntoResponse {
    state.metrics.inc_requests();
    Json(ListToolsResult {
        tools: state.handler.list_tools(),
    })
}

/// Call tool request.
#[derive(Debug, Deserialize)]
struct CallToolRequest {
    name: String,
    #[serde(default)]
    arguments: HashMap<String, serde_json::Value>,
}

/// Call tool endpoint.
async fn call_tool(
    State(state): State<HttpState>,
    Json(req): Json<CallToolRequest>,
) -> impl IntoResponse {
    state.metrics.inc_requests();

    let Some(handler) = state.handler.get_tool(&req.name) else {
        state.metrics.inc_failed();
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": Error::ToolNotFound(req.name).to_string()
            })),
        );
    };

    state.metrics.inc_tool_calls();
    let outcome = handler
        .execute(req.arguments)
        .await
        .and_then(|result| Ok(serde_json::to_value(result)?));

    match outcome {
        Ok(value) => {
            if value["isError"] == true {
                state.metrics.inc_failed();
            }
            (StatusCode::OK, Json(value))
        }
        Err(e) => {
            state.metrics.inc_failed();
            warn!("Tool {} failed: {}", req.name, e);
            let status = if e.is_caller_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}
