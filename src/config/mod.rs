//! Configuration management for the context assembler.

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::parse_timestamp;
use crate::error::{Error, Result};

/// Command-line arguments for the context assembler.
#[derive(Parser, Debug, Clone)]
#[command(name = "context-assembler")]
#[command(author = "Context Engine Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server that assembles bounded context packages for LLM agents")]
pub struct Args {
    /// Transport mode: stdio or http
    #[arg(short, long, default_value = "stdio", env = "CONTEXT_ASSEMBLER_TRANSPORT")]
    pub transport: Transport,

    /// HTTP port (only for http transport)
    #[arg(short, long, default_value = "3000", env = "CONTEXT_ASSEMBLER_PORT")]
    pub port: u16,

    /// Enable debug logging
    #[arg(short, long, env = "CONTEXT_ASSEMBLER_DEBUG")]
    pub debug: bool,

    /// Enable metrics collection
    #[arg(long, env = "CONTEXT_ASSEMBLER_METRICS")]
    pub metrics: bool,

    /// Render this package file (JSON or YAML) to stdout and exit
    #[arg(long, env = "CONTEXT_ASSEMBLER_PACKAGE")]
    pub package: Option<PathBuf>,

    /// Reference time for relative timestamps (RFC 3339, defaults to now)
    #[arg(long, env = "CONTEXT_ASSEMBLER_NOW")]
    pub now: Option<String>,
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transport mode
    pub transport: Transport,
    /// HTTP port
    pub port: u16,
    /// Debug mode
    pub debug: bool,
    /// Metrics enabled
    pub metrics: bool,
    /// One-shot package file
    pub package: Option<PathBuf>,
    /// Fixed reference time
    pub now: Option<DateTime<Utc>>,
}

impl Config {
    /// The reference time for rendering: the configured one, else the wall clock.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        let now = args
            .now
            .as_deref()
            .map(|raw| parse_timestamp(raw).ok_or_else(|| Error::InvalidTimestamp(raw.to_string())))
            .transpose()?;

        Ok(Self {
            transport: args.transport,
            port: args.port,
            debug: args.debug,
            metrics: args.metrics,
            package: args.package,
            now,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            port: 3000,
            debug: false,
            metrics: false,
            package: None,
            now: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            transport: Transport::Http,
            port: 4000,
            debug: true,
            metrics: true,
            package: Some(PathBuf::from("/tmp/package.json")),
            now: None,
        }
    }

    #[test]
    fn test_transport_default() {
        assert_eq!(Transport::default(), Transport::Stdio);
    }

    #[test]
    fn test_transport_serialization() {
        let transports = [
            (Transport::Stdio, "\"stdio\""),
            (Transport::Http, "\"http\""),
        ];

        for (transport, expected) in &transports {
            let json = serde_json::to_string(transport).unwrap();
            assert_eq!(json, *expected);
        }
    }

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.port, 3000);
        assert!(!config.debug);
        assert!(!config.metrics);
        assert!(config.package.is_none());
        assert!(config.now.is_none());
    }

    #[test]
    fn test_args_to_config() {
        let config = Config::try_from(args()).unwrap();

        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.port, 4000);
        assert!(config.debug);
        assert!(config.metrics);
        assert_eq!(config.package, Some(PathBuf::from("/tmp/package.json")));
    }

    #[test]
    fn test_fixed_reference_time() {
        let config = Config::try_from(Args {
            now: Some("2024-06-01T12:00:00Z".to_string()),
            ..args()
        })
        .unwrap();

        let expected = parse_timestamp("2024-06-01T12:00:00Z").unwrap();
        assert_eq!(config.reference_time(), expected);
    }

    #[test]
    fn test_invalid_reference_time_rejected() {
        let err = Config::try_from(Args {
            now: Some("next tuesday".to_string()),
            ..args()
        })
        .unwrap_err();

        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "transport": "http",
            "port": 8080,
            "debug": true,
            "metrics": false,
            "package": null,
            "now": "2024-06-01T12:00:00Z"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.port, 8080);
        assert!(config.now.is_some());
    }
}
