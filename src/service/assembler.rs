//! Assembler service - wraps the pure engine with logging, metrics and the
//! configured reference time.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::{self, Section};
use crate::error::{Error, Result};
use crate::metrics::{Metrics, Timer};
use crate::service::loader;
use crate::types::{ContextPackage, SearchQueries, SearchResults, TaskType};

/// Service for rendering context packages.
pub struct AssemblerService {
    metrics: Arc<Metrics>,
    fixed_now: Option<DateTime<Utc>>,
}

impl AssemblerService {
    /// Create a new assembler service.
    pub fn new(config: &Config, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            fixed_now: config.now,
        }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Resolve the reference time: per-call override, then the configured
    /// time, then the wall clock.
    pub fn reference_time(&self, requested: Option<&str>) -> Result<DateTime<Utc>> {
        match requested {
            Some(raw) => engine::parse_timestamp(raw)
                .ok_or_else(|| Error::InvalidTimestamp(raw.to_string())),
            None => Ok(self.fixed_now.unwrap_or_else(Utc::now)),
        }
    }

    /// Render the full document.
    pub fn assemble(&self, pkg: &ContextPackage, now: DateTime<Utc>) -> String {
        let timer = Timer::start();
        let document = engine::assemble(pkg, now);
        self.metrics.inc_assembled();

        debug!(
            "Assembled {} package: {} chars in {}us",
            pkg.task_type,
            document.len(),
            timer.elapsed_us()
        );
        document
    }

    /// Render one section.
    pub fn render_section(&self, pkg: &ContextPackage, section: Section, now: DateTime<Utc>) -> String {
        self.metrics.inc_sections();
        debug!("Rendering section {} for {} package", section, pkg.task_type);
        engine::render_section(pkg, section, now)
    }

    /// Derive the three search queries for a task.
    pub fn derive_queries(&self, task_type: &TaskType, user_input: &str) -> SearchQueries {
        self.metrics.inc_queries();
        let queries = engine::derive_queries(task_type, user_input);
        debug!(
            "Derived queries: web={:?} code={:?} libraries={}",
            queries.web_search,
            queries.code_search,
            queries.library_search.len()
        );
        queries
    }

    /// Render retrieved search results.
    pub fn format_search_results(&self, results: &SearchResults) -> String {
        engine::format_search_results(results)
    }

    /// Decode a package from tool arguments, counting rejections.
    pub fn decode(&self, value: serde_json::Value) -> Result<ContextPackage> {
        loader::package_from_value(value).inspect_err(|e| {
            self.metrics.inc_rejected();
            warn!("Rejected package: {}", e);
        })
    }

    /// Load a package file, counting rejections.
    pub async fn load(&self, path: &Path) -> Result<ContextPackage> {
        loader::load_package(path).await.inspect_err(|e| {
            if matches!(e, Error::InvalidPackage(_)) {
                self.metrics.inc_rejected();
            }
            warn!("Failed to load package {:?}: {}", path, e);
        })
    }
}
