//! Search query derivation.
//!
//! Turns a task description into queries for the external retrieval
//! collaborator. All functions are total: no match yields the original text
//! or an empty list.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::types::{SearchQueries, TaskType};

/// Appended to every web query to bias toward recent material.
pub const RECENCY_HINT: &str = "latest";

const ARCHITECTURE_PHRASE: &str = "software architecture design patterns best practices";
const FEATURE_PHRASE: &str = "implementation guide tutorial examples";
const BUGFIX_PHRASE: &str = "bug fix troubleshooting solution";
const REFACTOR_PHRASE: &str = "refactoring clean code techniques";
const DECISION_PHRASE: &str = "technology comparison pros cons trade-offs";
const PROGRESS_PHRASE: &str = "project planning progress tracking";
const GENERAL_PHRASE: &str = "programming guide best practices";

/// Technical terms worth sending to code search.
const CODE_KEYWORDS: &[&str] = &[
    // Languages
    "javascript", "typescript", "python", "java", "rust", "golang", "ruby", "php", "kotlin",
    "swift", "csharp", "sql",
    // Frameworks and runtimes
    "react", "vue", "angular", "svelte", "node", "nodejs", "express", "nextjs", "django",
    "flask", "fastapi", "spring", "rails", "laravel", "tokio", "axum",
    // Concepts
    "api", "rest", "graphql", "http", "async", "await", "promise", "function", "class",
    "interface", "component", "hook", "middleware", "database", "query", "auth", "jwt",
    "oauth", "cache", "websocket",
    // HTTP verbs
    "get", "post", "put", "patch", "delete",
];

/// Known libraries, in the order results are reported.
const LIBRARIES: &[&str] = &[
    "react", "vue", "angular", "svelte", "express", "django", "flask", "fastapi", "spring",
    "laravel", "tensorflow", "pytorch", "pandas", "numpy", "mongodb", "postgresql", "mysql",
    "redis", "elasticsearch", "kafka", "docker", "kubernetes", "graphql", "tokio", "axum",
    "serde", "jest", "webpack", "tailwind",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_]*").expect("valid word pattern"));

/// Keyword phrase for a task type; unknown types get the general phrase.
pub fn task_phrase(task_type: &TaskType) -> &'static str {
    match task_type {
        TaskType::Architecture => ARCHITECTURE_PHRASE,
        TaskType::Feature => FEATURE_PHRASE,
        TaskType::Bugfix => BUGFIX_PHRASE,
        TaskType::Refactor => REFACTOR_PHRASE,
        TaskType::Decision => DECISION_PHRASE,
        TaskType::Progress => PROGRESS_PHRASE,
        TaskType::General | TaskType::Custom(_) => GENERAL_PHRASE,
    }
}

/// `"{input} {task phrase} {recency hint}"`.
pub fn web_query(task_type: &TaskType, user_input: &str) -> String {
    let input = user_input.trim();
    if input.is_empty() {
        return format!("{} {}", task_phrase(task_type), RECENCY_HINT);
    }
    format!("{} {} {}", input, task_phrase(task_type), RECENCY_HINT)
}

/// Technical keywords from `user_input`, deduplicated in first-seen order.
///
/// Falls back to the input unchanged when nothing matches.
pub fn code_query(user_input: &str) -> String {
    let mut seen = HashSet::new();
    let keywords: Vec<String> = WORD_RE
        .find_iter(user_input)
        .map(|word| word.as_str().to_lowercase())
        .filter(|word| CODE_KEYWORDS.contains(&word.as_str()))
        .filter(|word| seen.insert(word.clone()))
        .collect();

    if keywords.is_empty() {
        user_input.to_string()
    } else {
        keywords.join(" ")
    }
}

/// Known libraries mentioned in `user_input`, in table order.
pub fn library_search_terms(user_input: &str) -> Vec<String> {
    let haystack = user_input.to_lowercase();
    LIBRARIES
        .iter()
        .filter(|library| haystack.contains(*library))
        .map(|library| library.to_string())
        .collect()
}

/// All three queries for one task.
pub fn derive_queries(task_type: &TaskType, user_input: &str) -> SearchQueries {
    SearchQueries {
        web_search: web_query(task_type, user_input),
        code_search: code_query(user_input),
        library_search: library_search_terms(user_input),
    }
}
