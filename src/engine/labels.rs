//! Display labels for enum-like codes and quality scores.
//!
//! Lookups never fail: a code missing from its table is shown as-is.

use std::fmt;

use crate::types::{Outcome, Priority, TaskType};

/// A code to label lookup table.
pub type LabelTable = &'static [(&'static str, &'static str)];

pub const TASK_TYPE_LABELS: LabelTable = &[
    ("architecture", "🏗️ Architecture Design"),
    ("feature", "✨ Feature Development"),
    ("bugfix", "🐛 Bug Fix"),
    ("refactor", "♻️ Refactoring"),
    ("decision", "🤔 Technical Decision"),
    ("progress", "📈 Progress Review"),
    ("general", "💬 General Task"),
];

pub const PRIORITY_LABELS: LabelTable = &[
    ("high", "🔴 High"),
    ("medium", "🟡 Medium"),
    ("low", "🟢 Low"),
];

pub const KNOWLEDGE_TYPE_LABELS: LabelTable = &[
    ("pattern", "🧩 Design Patterns"),
    ("solution", "💡 Solutions"),
    ("best-practice", "⭐ Best Practices"),
    ("example", "📝 Examples"),
    ("other", "📎 Other"),
    ("general", "📎 General"),
];

pub const OUTCOME_LABELS: LabelTable = &[
    ("success", "✅ Success"),
    ("partial_success", "⚠️ Partial Success"),
    ("failure", "❌ Failure"),
    ("unknown", "❔ Unknown"),
];

pub const VERBOSITY_LABELS: LabelTable = &[
    ("minimal", "Minimal"),
    ("moderate", "Moderate"),
    ("detailed", "Detailed"),
];

pub const DOCUMENTATION_LABELS: LabelTable = &[
    ("minimal", "Minimal"),
    ("standard", "Standard"),
    ("comprehensive", "Comprehensive"),
];

pub const RESPONSE_LENGTH_LABELS: LabelTable = &[
    ("brief", "Brief"),
    ("moderate", "Moderate"),
    ("detailed", "Detailed"),
];

pub const TECHNICAL_DETAIL_LABELS: LabelTable = &[
    ("basic", "Basic"),
    ("intermediate", "Intermediate"),
    ("advanced", "Advanced"),
];

pub const EXAMPLE_PREFERENCE_LABELS: LabelTable = &[
    ("minimal", "Minimal"),
    ("moderate", "Moderate"),
    ("extensive", "Extensive"),
];

/// Look up `code` in `table`, falling back to the code itself.
pub fn translate(code: &str, table: LabelTable) -> String {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn task_type_label(task_type: &TaskType) -> String {
    translate(task_type.as_str(), TASK_TYPE_LABELS)
}

pub fn priority_label(priority: &Priority) -> String {
    translate(priority.as_str(), PRIORITY_LABELS)
}

pub fn knowledge_type_label(code: &str) -> String {
    translate(code, KNOWLEDGE_TYPE_LABELS)
}

pub fn outcome_label(outcome: &Outcome) -> String {
    translate(outcome.as_str(), OUTCOME_LABELS)
}

/// Quality band for a completeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl QualityBand {
    /// Band a 0-100 score. Thresholds are inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            QualityBand::Excellent
        } else if score >= 80.0 {
            QualityBand::Good
        } else if score >= 70.0 {
            QualityBand::Fair
        } else {
            QualityBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityBand::Excellent => "🌟 Excellent",
            QualityBand::Good => "👍 Good",
            QualityBand::Fair => "👌 Fair",
            QualityBand::NeedsImprovement => "⚠️ Needs Improvement",
        }
    }
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render a score with its band, e.g. `🌟 Excellent (95/100)`.
///
/// The number shown is the score that was banded, so `89.6` reads as Good.
pub fn quality_label(score: f64) -> String {
    format!("{} ({}/100)", QualityBand::from_score(score), score)
}
