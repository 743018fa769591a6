//! Grouping, filtering and capping helpers.
//!
//! Nothing here re-sorts: the order a caller hands in is the order rendered.

use std::collections::HashMap;

use crate::types::{ConversationHistory, Outcome};

/// Group used for items without a key.
pub const DEFAULT_GROUP: &str = "general";

/// Outcomes worth showing as precedent.
pub const RELEVANT_OUTCOMES: &[Outcome] = &[Outcome::Success, Outcome::PartialSuccess];

/// Group `items` by key, keeping first-seen key order and the original
/// relative order inside each group. A `None` key groups under
/// [`DEFAULT_GROUP`].
pub fn group_by<'a, T, F>(items: &'a [T], key_fn: F) -> Vec<(String, Vec<&'a T>)>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut groups: Vec<(String, Vec<&'a T>)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for item in items {
        let key = key_fn(item).unwrap_or(DEFAULT_GROUP);
        match index.get(key) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(key, groups.len());
                groups.push((key.to_string(), vec![item]));
            }
        }
    }

    groups
}

/// Keep entries whose outcome is in `allowed`, in order, then take `cap`.
pub fn filter_and_cap_history<'a>(
    history: &'a [ConversationHistory],
    allowed: &[Outcome],
    cap: usize,
) -> Vec<&'a ConversationHistory> {
    history
        .iter()
        .filter(|entry| allowed.contains(&entry.outcome))
        .take(cap)
        .collect()
}

/// The first `n` items.
pub fn cap_list<T>(items: &[T], n: usize) -> &[T] {
    &items[..items.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        kind: Option<&'static str>,
        id: usize,
    }

    fn history(outcomes: &[&str]) -> Vec<ConversationHistory> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| ConversationHistory {
                timestamp: "2024-06-01T12:00:00Z".to_string(),
                user_input: format!("turn {}", i),
                outcome: Outcome::from(*outcome),
                actions: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_group_by_is_stable() {
        let items = [
            Item { kind: Some("solution"), id: 0 },
            Item { kind: None, id: 1 },
            Item { kind: Some("solution"), id: 2 },
        ];

        let groups = group_by(&items, |item| item.kind);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "solution");
        assert_eq!(groups[0].1.iter().map(|i| i.id).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(groups[1].0, "general");
        assert_eq!(groups[1].1.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_group_by_merges_explicit_general() {
        let items = [
            Item { kind: None, id: 0 },
            Item { kind: Some("pattern"), id: 1 },
            Item { kind: Some("general"), id: 2 },
        ];

        let groups = group_by(&items, |item| item.kind);
        assert_eq!(groups[0].0, "general");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "pattern");
    }

    #[test]
    fn test_group_by_empty() {
        let items: [Item; 0] = [];
        assert!(group_by(&items, |item| item.kind).is_empty());
    }

    #[test]
    fn test_filter_and_cap_history() {
        let entries = history(&["failure", "success", "unknown", "partial_success", "success"]);

        let kept = filter_and_cap_history(&entries, RELEVANT_OUTCOMES, 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].user_input, "turn 1");
        assert_eq!(kept[1].user_input, "turn 3");
    }

    #[test]
    fn test_filter_and_cap_history_none_survive() {
        let entries = history(&["failure", "unknown"]);
        assert!(filter_and_cap_history(&entries, RELEVANT_OUTCOMES, 2).is_empty());
    }

    #[test]
    fn test_cap_list() {
        let items = [1, 2, 3, 4];
        assert_eq!(cap_list(&items, 2), &[1, 2]);
        assert_eq!(cap_list(&items, 10), &[1, 2, 3, 4]);
        assert!(cap_list(&items, 0).is_empty());
    }
}
