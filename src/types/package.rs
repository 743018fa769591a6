//! Context package types.
//!
//! A [`ContextPackage`] bundles everything compiled for one agent turn:
//! project metadata, user preferences, retrieved knowledge, code patterns,
//! tool inventory and recent conversation history. Every value here is built
//! once by the loader and then only read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares an enum-like code that keeps unknown values instead of rejecting them.
///
/// Known codes are matched case-insensitively; anything else lands in
/// `Custom` with its original spelling preserved.
macro_rules! open_code {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A code this crate does not know about.
            Custom(String),
        }

        impl $name {
            /// The wire code for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Custom(code) => code,
                }
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                match code.trim().to_lowercase().as_str() {
                    $($code => Self::$variant,)+
                    _ => Self::Custom(code),
                }
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::from(code.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_code! {
    /// Kind of task the agent is working on.
    TaskType {
        Architecture => "architecture",
        Feature => "feature",
        Bugfix => "bugfix",
        Refactor => "refactor",
        Decision => "decision",
        Progress => "progress",
        General => "general",
    }
}

open_code! {
    /// Task priority.
    Priority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

open_code! {
    /// Category of a knowledge item.
    KnowledgeType {
        Pattern => "pattern",
        Solution => "solution",
        BestPractice => "best-practice",
        Example => "example",
        Other => "other",
    }
}

open_code! {
    /// Outcome of a past conversation turn.
    Outcome {
        Success => "success",
        PartialSuccess => "partial_success",
        Failure => "failure",
        Unknown => "unknown",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Unknown
    }
}

impl Priority {
    /// Severity rank: high > medium > low > anything unknown.
    pub fn severity(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Custom(_) => 0,
        }
    }
}

/// The complete bundle compiled for one agent turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPackage {
    /// Kind of task
    pub task_type: TaskType,
    /// Task priority
    #[serde(default)]
    pub priority: Priority,
    /// Context completeness (0-100)
    #[serde(default)]
    pub completeness_score: f64,
    /// Session identifier
    #[serde(default)]
    pub session_id: String,
    /// Package creation time (ISO 8601)
    #[serde(default)]
    pub timestamp: String,
    /// The user's request
    #[serde(default)]
    pub user_input: String,
    /// Ordered instructions for the agent
    #[serde(default)]
    pub system_instructions: Vec<String>,
    /// Project metadata
    #[serde(default)]
    pub project_context: ProjectContext,
    /// Long-lived user preferences
    #[serde(default)]
    pub long_term_memory: UserPreferences,
    /// Knowledge items, already ranked by the caller
    #[serde(default)]
    pub relevant_knowledge: Vec<KnowledgeItem>,
    /// Related code patterns
    #[serde(default)]
    pub related_patterns: Vec<CodePattern>,
    /// Tools the agent may call
    #[serde(default)]
    pub available_tools: Vec<ToolDescriptor>,
    /// Recent conversation turns
    #[serde(default)]
    pub short_term_memory: Vec<ConversationHistory>,
    /// Free-text feasibility notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility_assessment: Option<String>,
    /// Suggestions for improving the context
    #[serde(default)]
    pub optimization_suggestions: Vec<String>,
}

impl ContextPackage {
    /// Create an otherwise empty package for a task.
    pub fn new(task_type: TaskType, user_input: impl Into<String>) -> Self {
        Self {
            task_type,
            priority: Priority::default(),
            completeness_score: 0.0,
            session_id: String::new(),
            timestamp: String::new(),
            user_input: user_input.into(),
            system_instructions: Vec::new(),
            project_context: ProjectContext::default(),
            long_term_memory: UserPreferences::default(),
            relevant_knowledge: Vec::new(),
            related_patterns: Vec::new(),
            available_tools: Vec::new(),
            short_term_memory: Vec::new(),
            feasibility_assessment: None,
            optimization_suggestions: Vec::new(),
        }
    }
}

/// Project metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    /// Architecture overview, possibly long
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default)]
    pub current_focus: Vec<String>,
    #[serde(default)]
    pub recent_changes: Vec<String>,
    #[serde(default)]
    pub open_issues: Vec<String>,
}

/// User preferences. An absent block means its section is omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_style: Option<CodingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_progress: Option<LearningProgress>,
}

impl UserPreferences {
    /// True when no preference block is present.
    pub fn is_empty(&self) -> bool {
        self.coding_style.is_none()
            && self.communication_style.is_none()
            && self.learning_progress.is_none()
    }
}

/// Preferred coding style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStyle {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    /// minimal | moderate | detailed
    #[serde(default)]
    pub verbosity: String,
    /// minimal | standard | comprehensive
    #[serde(default)]
    pub documentation_level: String,
}

/// Preferred communication style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStyle {
    /// brief | moderate | detailed
    #[serde(default)]
    pub response_length: String,
    /// basic | intermediate | advanced
    #[serde(default)]
    pub technical_detail: String,
    /// minimal | moderate | extensive
    #[serde(default)]
    pub example_preference: String,
}

/// What the user has already learned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    #[serde(default)]
    pub success_patterns: Vec<String>,
    #[serde(default)]
    pub mastered_concepts: Vec<String>,
}

/// A retrieved piece of knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category; missing items group under "general"
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<KnowledgeType>,
    /// Relevance score (0-1), computed upstream
    #[serde(default)]
    pub relevance_score: f64,
}

/// A reusable code pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePattern {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// One past conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHistory {
    /// When the turn happened (ISO 8601); missing renders as an unknown time
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub outcome: Outcome,
    /// Actions taken; only the count is rendered
    #[serde(default)]
    pub actions: Vec<serde_json::Value>,
}

/// A tool the agent may call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub recommended_use: Vec<String>,
}
