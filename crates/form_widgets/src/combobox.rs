//! Filtering and selection helpers for the searchable multi-select.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboboxOption {
    pub value: String,
    pub label: String,
}

impl ComboboxOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options whose label or value contains `query`, ignoring case. A blank query keeps everything.
pub fn filter_options<'a>(options: &'a [ComboboxOption], query: &str) -> Vec<&'a ComboboxOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|option| {
            needle.is_empty()
                || option.label.to_lowercase().contains(&needle)
                || option.value.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Adds or removes `value`. Adding past `max_selected` is refused and returns `false`.
pub fn toggle_selection(selected: &mut Vec<String>, value: &str, max_selected: Option<usize>) -> bool {
    if let Some(index) = selected.iter().position(|current| current == value) {
        selected.remove(index);
        return true;
    }
    if max_selected.is_some_and(|max| selected.len() >= max) {
        return false;
    }
    selected.push(value.to_string());
    true
}

/// Drops `value` from the selection if present.
pub fn remove_selection(selected: &mut Vec<String>, value: &str) {
    selected.retain(|current| current != value);
}

/// Labels for the selected values in selection order. Unknown values fall back to the raw value.
pub fn selected_labels(options: &[ComboboxOption], selected: &[String]) -> Vec<(String, String)> {
    selected
        .iter()
        .map(|value| {
            let label = options
                .iter()
                .find(|option| &option.value == value)
                .map_or_else(|| value.clone(), |option| option.label.clone());
            (value.clone(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> Vec<ComboboxOption> {
        vec![
            ComboboxOption::new("rs", "Rust"),
            ComboboxOption::new("ts", "TypeScript"),
            ComboboxOption::new("go", "Go"),
        ]
    }

    #[test]
    fn filter_matches_label_or_value_case_insensitively() {
        let options = options();
        let labels = |query: &str| -> Vec<String> {
            filter_options(&options, query)
                .into_iter()
                .map(|option| option.label.clone())
                .collect()
        };
        assert_eq!(labels("  "), vec!["Rust", "TypeScript", "Go"]);
        assert_eq!(labels("SCRIPT"), vec!["TypeScript"]);
        assert_eq!(labels("rs"), vec!["Rust"]);
        assert_eq!(labels("t"), vec!["Rust", "TypeScript"]);
        assert!(labels("zig").is_empty());
    }

    #[test]
    fn toggle_respects_cap_but_always_allows_removal() {
        let mut selected = Vec::new();
        assert!(toggle_selection(&mut selected, "rs", Some(2)));
        assert!(toggle_selection(&mut selected, "go", Some(2)));
        assert!(!toggle_selection(&mut selected, "ts", Some(2)));
        assert_eq!(selected, vec!["rs".to_string(), "go".to_string()]);

        assert!(toggle_selection(&mut selected, "rs", Some(2)));
        assert_eq!(selected, vec!["go".to_string()]);
    }

    #[test]
    fn labels_follow_selection_order() {
        let selected = vec!["go".to_string(), "legacy".to_string()];
        assert_eq!(
            selected_labels(&options(), &selected),
            vec![
                ("go".to_string(), "Go".to_string()),
                ("legacy".to_string(), "legacy".to_string()),
            ]
        );
        let mut selected = selected;
        remove_selection(&mut selected, "legacy");
        assert_eq!(selected, vec!["go".to_string()]);
    }
}
