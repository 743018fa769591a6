//! Section formatters.
//!
//! Each formatter takes its slice of a [`ContextPackage`] and returns a
//! markdown fragment. Empty inputs render the section title followed by an
//! italic placeholder so the reader can tell "nothing known" from "section
//! missing".

use chrono::{DateTime, Utc};

use super::labels::{
    self, knowledge_type_label, outcome_label, priority_label, quality_label, task_type_label,
    translate,
};
use super::rank::{cap_list, filter_and_cap_history, group_by, RELEVANT_OUTCOMES};
use super::summarize::summarize;
use super::time::{display_timestamp, relative_time_str};
use crate::types::{
    CodePattern, CodingStyle, CommunicationStyle, ContextPackage, ConversationHistory,
    KnowledgeItem, LearningProgress, ProjectContext, ToolDescriptor, UserPreferences,
};

// ===== Titles =====

pub const HEADER_TITLE: &str = "# 🤖 AI Context Package";
pub const TASK_TITLE: &str = "## 📋 Current Task";
pub const PROJECT_TITLE: &str = "## 🏗️ Project Context";
pub const USER_TITLE: &str = "## 👤 User Preferences";
pub const KNOWLEDGE_TITLE: &str = "## 📚 Relevant Knowledge";
pub const PATTERNS_TITLE: &str = "## 🎨 Code Patterns";
pub const TOOLS_TITLE: &str = "## 🛠️ Available Tools";
pub const HISTORY_TITLE: &str = "## 📜 Recent History";
pub const QUALITY_TITLE: &str = "## ✅ Quality Assessment";

// ===== Placeholders =====

pub const NO_INSTRUCTIONS: &str = "*No specific instructions provided.*";
pub const NO_PROJECT_CONTEXT: &str = "*No project context available.*";
pub const NO_PREFERENCES: &str = "*No user preferences recorded.*";
pub const NO_KNOWLEDGE: &str =
    "*No relevant knowledge found. Consider searching external resources for this task.*";
pub const NO_PATTERNS: &str = "*No related code patterns identified.*";
pub const NO_TOOLS: &str = "*No tools available for this task.*";
pub const NEW_SESSION: &str = "*This is a new session with no previous conversation history.*";
pub const NO_PRECEDENT: &str = "*No successful precedent in recent history.*";

// ===== Budgets =====

const TASK_INPUT_CHARS: usize = 200;
const GOALS_CAP: usize = 3;
const KEY_FEATURES_CAP: usize = 5;
const ARCHITECTURE_CHARS: usize = 150;
const CURRENT_FOCUS_CAP: usize = 3;
const RECENT_CHANGES_CAP: usize = 3;
const OPEN_ISSUES_CAP: usize = 3;
const LEARNING_CAP: usize = 3;
const KNOWLEDGE_PER_GROUP: usize = 3;
const KNOWLEDGE_DESCRIPTION_CHARS: usize = 100;
const PATTERNS_CAP: usize = 3;
const BENEFITS_CAP: usize = 2;
const CAPABILITIES_CAP: usize = 3;
const RECOMMENDED_USE_CAP: usize = 2;
const HISTORY_CAP: usize = 2;
const HISTORY_INPUT_CHARS: usize = 60;
const SUGGESTIONS_CAP: usize = 3;

pub(crate) const BULLET: &str = "•";

/// `• item` lines for the first `cap` items.
fn bullets(items: &[String], cap: usize) -> Vec<String> {
    cap_list(items, cap)
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect()
}

/// A bold label followed by bullets, or `None` when there is nothing to list.
fn bullet_block(label: &str, items: &[String], cap: usize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut lines = vec![format!("**{}**:", label)];
    lines.extend(bullets(items, cap));
    Some(lines.join("\n"))
}

fn joined(items: &[String], cap: usize) -> String {
    cap_list(items, cap).join(", ")
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Package header: task type, priority, quality, session and time.
pub fn format_header(pkg: &ContextPackage) -> String {
    let session = non_blank(&pkg.session_id).unwrap_or("-");
    [
        HEADER_TITLE.to_string(),
        String::new(),
        format!("**Task Type**: {}", task_type_label(&pkg.task_type)),
        format!("**Priority**: {}", priority_label(&pkg.priority)),
        format!("**Context Quality**: {}", quality_label(pkg.completeness_score)),
        format!("**Session**: {}", session),
        format!("**Generated**: {}", display_timestamp(&pkg.timestamp)),
    ]
    .join("\n")
}

/// The user's request, quoted, and the numbered instructions.
pub fn format_task(user_input: &str, instructions: &[String]) -> String {
    let quoted = summarize(user_input.trim(), TASK_INPUT_CHARS)
        .lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    let mut blocks = vec![TASK_TITLE.to_string()];
    if !quoted.is_empty() {
        blocks.push(quoted);
    }

    if instructions.is_empty() {
        blocks.push(format!("**Instructions**:\n{}", NO_INSTRUCTIONS));
    } else {
        let numbered = instructions
            .iter()
            .enumerate()
            .map(|(i, instruction)| format!("{}. {}", i + 1, instruction))
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(format!("**Instructions**:\n{}", numbered));
    }

    blocks.join("\n\n")
}

/// Goals, features, architecture, focus, changes and issues, in that order.
pub fn format_project_context(project: &ProjectContext) -> String {
    let architecture = project
        .architecture
        .as_deref()
        .and_then(non_blank)
        .map(|text| format!("**🏛️ Architecture**: {}", summarize(text, ARCHITECTURE_CHARS)));

    let blocks: Vec<String> = [
        bullet_block("🎯 Goals", &project.goals, GOALS_CAP),
        bullet_block("✨ Key Features", &project.key_features, KEY_FEATURES_CAP),
        architecture,
        bullet_block("🔍 Current Focus", &project.current_focus, CURRENT_FOCUS_CAP),
        bullet_block("🔄 Recent Changes", &project.recent_changes, RECENT_CHANGES_CAP),
        bullet_block("⚠️ Open Issues", &project.open_issues, OPEN_ISSUES_CAP),
    ]
    .into_iter()
    .flatten()
    .collect();

    titled(PROJECT_TITLE, blocks, NO_PROJECT_CONTEXT)
}

fn coding_style_block(style: &CodingStyle) -> Option<String> {
    let mut lines = Vec::new();
    if !style.languages.is_empty() {
        lines.push(format!("{} Languages: {}", BULLET, style.languages.join(", ")));
    }
    if !style.frameworks.is_empty() {
        lines.push(format!("{} Frameworks: {}", BULLET, style.frameworks.join(", ")));
    }
    if let Some(verbosity) = non_blank(&style.verbosity) {
        lines.push(format!(
            "{} Verbosity: {}",
            BULLET,
            translate(verbosity, labels::VERBOSITY_LABELS)
        ));
    }
    if let Some(level) = non_blank(&style.documentation_level) {
        lines.push(format!(
            "{} Documentation: {}",
            BULLET,
            translate(level, labels::DOCUMENTATION_LABELS)
        ));
    }
    labelled_lines("💻 Coding Style", lines)
}

fn communication_style_block(style: &CommunicationStyle) -> Option<String> {
    let fields = [
        ("Response length", &style.response_length, labels::RESPONSE_LENGTH_LABELS),
        ("Technical detail", &style.technical_detail, labels::TECHNICAL_DETAIL_LABELS),
        ("Examples", &style.example_preference, labels::EXAMPLE_PREFERENCE_LABELS),
    ];
    let lines = fields
        .iter()
        .filter_map(|(name, value, table)| {
            non_blank(value).map(|value| format!("{} {}: {}", BULLET, name, translate(value, *table)))
        })
        .collect();
    labelled_lines("💬 Communication Style", lines)
}

fn learning_progress_block(progress: &LearningProgress) -> Option<String> {
    let mut lines = Vec::new();
    if !progress.success_patterns.is_empty() {
        lines.push(format!(
            "{} Success patterns: {}",
            BULLET,
            joined(&progress.success_patterns, LEARNING_CAP)
        ));
    }
    if !progress.mastered_concepts.is_empty() {
        lines.push(format!(
            "{} Mastered concepts: {}",
            BULLET,
            joined(&progress.mastered_concepts, LEARNING_CAP)
        ));
    }
    labelled_lines("📈 Learning Progress", lines)
}

fn labelled_lines(label: &str, lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(format!("**{}**:\n{}", label, lines.join("\n")))
}

/// Coding style, communication style and learning progress, each only when present.
pub fn format_user_context(prefs: &UserPreferences) -> String {
    let blocks: Vec<String> = [
        prefs.coding_style.as_ref().and_then(coding_style_block),
        prefs
            .communication_style
            .as_ref()
            .and_then(communication_style_block),
        prefs
            .learning_progress
            .as_ref()
            .and_then(learning_progress_block),
    ]
    .into_iter()
    .flatten()
    .collect();

    titled(USER_TITLE, blocks, NO_PREFERENCES)
}

/// Knowledge grouped by type, up to three items per group.
pub fn format_knowledge(items: &[KnowledgeItem]) -> String {
    let groups = group_by(items, |item| item.kind.as_ref().map(|kind| kind.as_str()));

    let blocks = groups
        .iter()
        .map(|(kind, members)| {
            let mut lines = vec![format!("### {}", knowledge_type_label(kind))];
            for item in cap_list(members, KNOWLEDGE_PER_GROUP) {
                lines.push(format!(
                    "{} **{}** ({}% relevance)",
                    BULLET,
                    item.title,
                    (item.relevance_score * 100.0).round() as i64
                ));
                if let Some(description) = non_blank(&item.description) {
                    lines.push(format!(
                        "  {}",
                        summarize(description, KNOWLEDGE_DESCRIPTION_CHARS)
                    ));
                }
            }
            lines.join("\n")
        })
        .collect();

    titled(KNOWLEDGE_TITLE, blocks, NO_KNOWLEDGE)
}

/// The first three patterns.
pub fn format_patterns(patterns: &[CodePattern]) -> String {
    let blocks = cap_list(patterns, PATTERNS_CAP)
        .iter()
        .map(|pattern| {
            let mut lines = vec![match non_blank(&pattern.category) {
                Some(category) => format!("### {} ({})", pattern.name, category),
                None => format!("### {}", pattern.name),
            }];
            if let Some(description) = non_blank(&pattern.description) {
                lines.push(description.to_string());
            }
            if let Some(use_case) = non_blank(&pattern.use_case) {
                lines.push(format!("{} **Use case**: {}", BULLET, use_case));
            }
            if !pattern.benefits.is_empty() {
                lines.push(format!(
                    "{} **Benefits**: {}",
                    BULLET,
                    joined(&pattern.benefits, BENEFITS_CAP)
                ));
            }
            lines.join("\n")
        })
        .collect();

    titled(PATTERNS_TITLE, blocks, NO_PATTERNS)
}

/// Every available tool.
pub fn format_tools(tools: &[ToolDescriptor]) -> String {
    let blocks = tools
        .iter()
        .map(|tool| {
            let mut lines = vec![format!("### {}", tool.name)];
            if let Some(description) = non_blank(&tool.description) {
                lines.push(description.to_string());
            }
            if !tool.capabilities.is_empty() {
                lines.push(format!(
                    "{} **Capabilities**: {}",
                    BULLET,
                    joined(&tool.capabilities, CAPABILITIES_CAP)
                ));
            }
            if !tool.recommended_use.is_empty() {
                lines.push(format!(
                    "{} **Recommended for**: {}",
                    BULLET,
                    joined(&tool.recommended_use, RECOMMENDED_USE_CAP)
                ));
            }
            lines.join("\n")
        })
        .collect();

    titled(TOOLS_TITLE, blocks, NO_TOOLS)
}

/// The two most recent successful or partially successful turns.
pub fn format_history(history: &[ConversationHistory], now: DateTime<Utc>) -> String {
    if history.is_empty() {
        return format!("{}\n\n{}", HISTORY_TITLE, NEW_SESSION);
    }

    let relevant = filter_and_cap_history(history, RELEVANT_OUTCOMES, HISTORY_CAP);
    if relevant.is_empty() {
        return format!("{}\n\n{}", HISTORY_TITLE, NO_PRECEDENT);
    }

    let lines = relevant
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. **{}**: \"{}\" → {} ({} actions)",
                i + 1,
                relative_time_str(&entry.timestamp, now),
                summarize(entry.user_input.trim(), HISTORY_INPUT_CHARS),
                outcome_label(&entry.outcome),
                entry.actions.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", HISTORY_TITLE, lines)
}

/// Completeness band, feasibility notes and up to three suggestions.
pub fn format_quality(score: f64, feasibility: Option<&str>, suggestions: &[String]) -> String {
    let mut blocks = vec![
        QUALITY_TITLE.to_string(),
        format!("**Completeness**: {}", quality_label(score)),
    ];
    if let Some(feasibility) = feasibility.filter(|f| non_blank(f).is_some()) {
        blocks.push(format!("**Feasibility**: {}", feasibility));
    }
    if let Some(block) = bullet_block("Optimization Suggestions", suggestions, SUGGESTIONS_CAP) {
        blocks.push(block);
    }
    blocks.join("\n\n")
}

/// Title followed by blocks, or by the placeholder when there are none.
fn titled(title: &str, blocks: Vec<String>, placeholder: &str) -> String {
    if blocks.is_empty() {
        return format!("{}\n\n{}", title, placeholder);
    }
    format!("{}\n\n{}", title, blocks.join("\n\n"))
}
