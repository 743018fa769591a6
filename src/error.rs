//! Error types for the context assembler.
//!
//! The formatting engine itself is total and never produces these; they are
//! raised at the boundary where packages are loaded and tool calls decoded.

use thiserror::Error;

/// Result type alias for context assembler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the context assembler.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Package Errors =====
    #[error("Invalid context package: {0}")]
    InvalidPackage(String),

    #[error("Unsupported package format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ===== MCP Errors =====
    #[error("MCP protocol error: {0}")]
    McpProtocol(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(String),

    // ===== I/O Errors =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== HTTP Errors =====
    #[error("HTTP server error: {0}")]
    HttpServer(String),

    // ===== Internal Errors =====
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the caller sent something malformed, as opposed to a server fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPackage(_)
                | Self::UnsupportedFormat(_)
                | Self::UnknownSection(_)
                | Self::InvalidTimestamp(_)
                | Self::ToolNotFound(_)
                | Self::InvalidToolArguments(_)
                | Self::Json(_)
        )
    }
}
