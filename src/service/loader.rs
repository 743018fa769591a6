//! Package loading at the engine boundary.
//!
//! Packages arrive as JSON or YAML produced by the persistence layer. Anything
//! that does not decode into a [`ContextPackage`] is rejected here so the
//! engine only ever sees well-typed input.

use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ContextPackage;

/// Serialized package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    Json,
    Yaml,
}

impl PackageFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(PackageFormat::Json),
            "yaml" | "yml" => Ok(PackageFormat::Yaml),
            "" => Err(Error::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decode a package from text.
pub fn parse_package(text: &str, format: PackageFormat) -> Result<ContextPackage> {
    match format {
        PackageFormat::Json => {
            serde_json::from_str(text).map_err(|e| Error::InvalidPackage(e.to_string()))
        }
        PackageFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| Error::InvalidPackage(e.to_string()))
        }
    }
}

/// Decode a package from an already-parsed JSON value (tool arguments).
pub fn package_from_value(value: Value) -> Result<ContextPackage> {
    serde_json::from_value(value).map_err(|e| Error::InvalidPackage(e.to_string()))
}

/// Read and decode a package file.
pub async fn load_package(path: &Path) -> Result<ContextPackage> {
    let format = PackageFormat::from_path(path)?;
    let text = fs::read_to_string(path).await?;
    debug!("Loaded {} bytes from {:?} ({:?})", text.len(), path, format);
    parse_package(&text, format)
}
