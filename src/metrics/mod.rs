//! Prometheus-style counters for monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total requests processed
    pub requests_total: AtomicU64,
    /// Failed requests
    pub requests_failed: AtomicU64,
    /// Tool calls
    pub tool_calls: AtomicU64,
    /// Full documents assembled
    pub packages_assembled: AtomicU64,
    /// Single sections rendered
    pub sections_rendered: AtomicU64,
    /// Packages rejected at the boundary
    pub packages_rejected: AtomicU64,
    /// Query sets derived
    pub queries_derived: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tool_calls(&self) {
        self.tool_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_assembled(&self) {
        self.packages_assembled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_sections(&self) {
        self.sections_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.packages_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_queries(&self) {
        self.queries_derived.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            tool_calls: self.tool_calls.load(Ordering::Relaxed),
            packages_assembled: self.packages_assembled.load(Ordering::Relaxed),
            sections_rendered: self.sections_rendered.load(Ordering::Relaxed),
            packages_rejected: self.packages_rejected.load(Ordering::Relaxed),
            queries_derived: self.queries_derived.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus text format.
    pub fn to_prometheus(&self) -> String {
        let s = self.snapshot();
        let counters = [
            ("requests_total", "Total number of requests", s.requests_total),
            ("requests_failed", "Failed requests", s.requests_failed),
            ("tool_calls", "Tool calls count", s.tool_calls),
            ("packages_assembled", "Context packages assembled", s.packages_assembled),
            ("sections_rendered", "Single sections rendered", s.sections_rendered),
            ("packages_rejected", "Packages rejected as malformed", s.packages_rejected),
            ("queries_derived", "Search query sets derived", s.queries_derived),
        ];

        counters
            .iter()
            .map(|(name, help, value)| {
                format!(
                    "# HELP context_assembler_{name} {help}\n\
                     # TYPE context_assembler_{name} counter\n\
                     context_assembler_{name} {value}\n"
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_failed: u64,
    pub tool_calls: u64,
    pub packages_assembled: u64,
    pub sections_rendered: u64,
    pub packages_rejected: u64,
    pub queries_derived: u64,
}

/// Timer for measuring durations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.inc_requests();
        metrics.inc_requests();
        metrics.inc_failed();
        metrics.inc_assembled();
        metrics.inc_queries();

        let s = metrics.snapshot();
        assert_eq!(s.requests_total, 2);
        assert_eq!(s.requests_failed, 1);
        assert_eq!(s.packages_assembled, 1);
        assert_eq!(s.queries_derived, 1);
        assert_eq!(s.tool_calls, 0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.inc_tool_calls();

        let text = metrics.to_prometheus();
        assert!(text.contains("# TYPE context_assembler_tool_calls counter"));
        assert!(text.contains("context_assembler_tool_calls 1\n"));
        assert!(text.contains("context_assembler_packages_assembled 0\n"));
    }
}
