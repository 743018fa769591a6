//! Markdown rendering for external search results.

use super::rank::cap_list;
use super::sections::BULLET;
use super::summarize::summarize;
use crate::types::{CodeSearchResult, LibrarySearchResult, SearchResults, WebSearchResult};

pub const SEARCH_TITLE: &str = "## 🔎 External Search Results";
pub const NO_SEARCH_RESULTS: &str = "*No external search results.*";

const WEB_CAP: usize = 5;
const WEB_SNIPPET_CHARS: usize = 150;
const CODE_CAP: usize = 3;
const LIBRARY_CAP: usize = 3;
const LIBRARY_CONTENT_CHARS: usize = 200;
const LIBRARY_EXAMPLES_CAP: usize = 2;

fn web_block(results: &[WebSearchResult]) -> String {
    let mut lines = vec!["### 🌐 Web".to_string()];
    for result in cap_list(results, WEB_CAP) {
        lines.push(format!(
            "{} [{}]({}) ({}% relevance)",
            BULLET,
            result.title,
            result.url,
            (result.relevance_score * 100.0).round() as i64
        ));
        if !result.snippet.trim().is_empty() {
            lines.push(format!("  {}", summarize(result.snippet.trim(), WEB_SNIPPET_CHARS)));
        }
    }
    lines.join("\n")
}

fn code_block(results: &[CodeSearchResult]) -> String {
    let mut blocks = vec!["### 💻 Code".to_string()];
    for result in cap_list(results, CODE_CAP) {
        let mut lines = vec![format!("**{}:{}**", result.file_path, result.line_number)];
        if !result.context.trim().is_empty() {
            lines.push(result.context.trim().to_string());
        }
        lines.push(format!("```{}\n{}\n```", result.language, result.code.trim_end()));
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

fn library_block(results: &[LibrarySearchResult]) -> String {
    let mut blocks = vec!["### 📦 Library Docs".to_string()];
    for result in cap_list(results, LIBRARY_CAP) {
        let heading = if result.section.trim().is_empty() {
            format!("**{}**", result.library)
        } else {
            format!("**{}** / {}", result.library, result.section.trim())
        };
        let mut lines = vec![heading];
        if !result.content.trim().is_empty() {
            lines.push(summarize(result.content.trim(), LIBRARY_CONTENT_CHARS));
        }
        for example in cap_list(&result.examples, LIBRARY_EXAMPLES_CAP) {
            lines.push(format!("```\n{}\n```", example.trim_end()));
        }
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

/// Render web, code and library results, skipping empty groups.
pub fn format_search_results(results: &SearchResults) -> String {
    if results.is_empty() {
        return format!("{}\n\n{}", SEARCH_TITLE, NO_SEARCH_RESULTS);
    }

    let mut blocks = vec![SEARCH_TITLE.to_string()];
    if !results.web.is_empty() {
        blocks.push(web_block(&results.web));
    }
    if !results.code.is_empty() {
        blocks.push(code_block(&results.code));
    }
    if !results.library.is_empty() {
        blocks.push(library_block(&results.library));
    }
    blocks.join("\n\n")
}
