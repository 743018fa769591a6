//! Package assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sections;
use crate::error::Error;
use crate::types::ContextPackage;

/// Separator between rendered sections.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// A titled subdivision of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Task,
    ProjectContext,
    UserContext,
    Knowledge,
    Patterns,
    Tools,
    History,
    Quality,
}

impl Section {
    /// All sections in render order.
    pub const ALL: [Section; 9] = [
        Section::Header,
        Section::Task,
        Section::ProjectContext,
        Section::UserContext,
        Section::Knowledge,
        Section::Patterns,
        Section::Tools,
        Section::History,
        Section::Quality,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Task => "task",
            Section::ProjectContext => "project_context",
            Section::UserContext => "user_context",
            Section::Knowledge => "knowledge",
            Section::Patterns => "patterns",
            Section::Tools => "tools",
            Section::History => "history",
            Section::Quality => "quality",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.name() == wanted)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// Render a single section of `pkg`.
pub fn render_section(pkg: &ContextPackage, section: Section, now: DateTime<Utc>) -> String {
    match section {
        Section::Header => sections::format_header(pkg),
        Section::Task => sections::format_task(&pkg.user_input, &pkg.system_instructions),
        Section::ProjectContext => sections::format_project_context(&pkg.project_context),
        Section::UserContext => sections::format_user_context(&pkg.long_term_memory),
        Section::Knowledge => sections::format_knowledge(&pkg.relevant_knowledge),
        Section::Patterns => sections::format_patterns(&pkg.related_patterns),
        Section::Tools => sections::format_tools(&pkg.available_tools),
        Section::History => sections::format_history(&pkg.short_term_memory, now),
        Section::Quality => sections::format_quality(
            pkg.completeness_score,
            pkg.feasibility_assessment.as_deref(),
            &pkg.optimization_suggestions,
        ),
    }
}

/// Render the whole package.
///
/// Sections render in [`Section::ALL`] order; fragments that are blank after
/// trimming are dropped and the rest joined with [`SECTION_SEPARATOR`].
/// `now` only feeds relative history times, so equal inputs give equal output.
pub fn assemble(pkg: &ContextPackage, now: DateTime<Utc>) -> String {
    Section::ALL
        .into_iter()
        .map(|section| render_section(pkg, section, now))
        .filter(|fragment| !fragment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
