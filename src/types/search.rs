//! External search result and query types.

use serde::{Deserialize, Serialize};

/// A web search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Content snippet
    #[serde(default)]
    pub snippet: String,
    /// Relevance score (0-1)
    #[serde(default)]
    pub relevance_score: f64,
}

/// A code search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSearchResult {
    /// File path relative to the searched repository
    pub file_path: String,
    /// Line number (1-based)
    #[serde(default)]
    pub line_number: u32,
    /// Language used for the fenced block
    #[serde(default)]
    pub language: String,
    /// The matched code
    pub code: String,
    /// Surrounding context description
    #[serde(default)]
    pub context: String,
}

/// A library documentation hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySearchResult {
    /// Library name
    pub library: String,
    /// Documentation section
    #[serde(default)]
    pub section: String,
    /// Section content
    #[serde(default)]
    pub content: String,
    /// Usage examples
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Results from all external lookups for one task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub web: Vec<WebSearchResult>,
    #[serde(default)]
    pub code: Vec<CodeSearchResult>,
    #[serde(default)]
    pub library: Vec<LibrarySearchResult>,
}

impl SearchResults {
    /// True when no lookup returned anything.
    pub fn is_empty(&self) -> bool {
        self.web.is_empty() && self.code.is_empty() && self.library.is_empty()
    }
}

/// Queries derived from a task for the external retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueries {
    /// Web search query
    pub web_search: String,
    /// Code search query
    pub code_search: String,
    /// Library names to look up
    pub library_search: Vec<String>,
}
