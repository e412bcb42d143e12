//! State helpers for the list-of-text-fields editor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Edits the array input refuses.
pub enum ArrayInputError {
    #[error("At most {max_items} items allowed")]
    Full { max_items: usize },
    #[error("At least {min_items} items required")]
    AtMinimum { min_items: usize },
    #[error("No item at position {index}")]
    OutOfRange { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Ordered text values plus their count bounds.
pub struct ArrayInputState {
    pub items: Vec<String>,
    pub min_items: usize,
    pub max_items: Option<usize>,
}

impl Default for ArrayInputState {
    fn default() -> Self {
        Self {
            items: vec![String::new()],
            min_items: 1,
            max_items: None,
        }
    }
}

impl ArrayInputState {
    /// Builds state from initial values, padding with blanks up to `min_items`.
    pub fn new(initial: Vec<String>, min_items: usize, max_items: Option<usize>) -> Self {
        let mut items = initial;
        if let Some(max_items) = max_items {
            items.truncate(max_items.max(min_items));
        }
        while items.len() < min_items {
            items.push(String::new());
        }
        Self {
            items,
            min_items,
            max_items,
        }
    }

    pub fn can_add(&self) -> bool {
        self.max_items.map_or(true, |max| self.items.len() < max)
    }

    pub fn can_remove(&self) -> bool {
        self.items.len() > self.min_items
    }

    /// Appends `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayInputError::Full`] when `max_items` is reached.
    pub fn push(&mut self, value: impl Into<String>) -> Result<(), ArrayInputError> {
        if let Some(max_items) = self.max_items.filter(|max| self.items.len() >= *max) {
            return Err(ArrayInputError::Full { max_items });
        }
        self.items.push(value.into());
        Ok(())
    }

    /// Removes the item at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayInputError::OutOfRange`] for a bad index and [`ArrayInputError::AtMinimum`]
    /// when removal would drop below `min_items`.
    pub fn remove(&mut self, index: usize) -> Result<String, ArrayInputError> {
        if index >= self.items.len() {
            return Err(ArrayInputError::OutOfRange { index });
        }
        if !self.can_remove() {
            return Err(ArrayInputError::AtMinimum {
                min_items: self.min_items,
            });
        }
        Ok(self.items.remove(index))
    }

    /// Replaces the item at `index`. Out-of-range edits are ignored.
    pub fn update(&mut self, index: usize, value: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            *item = value.into();
        }
    }

    /// Trimmed values with blanks dropped, as submitted with the form.
    pub fn non_empty_values(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn new_pads_to_minimum_and_truncates_to_maximum() {
        let padded = ArrayInputState::new(Vec::new(), 2, None);
        assert_eq!(padded.items, strings(&["", ""]));

        let truncated = ArrayInputState::new(strings(&["a", "b", "c"]), 1, Some(2));
        assert_eq!(truncated.items, strings(&["a", "b"]));
    }

    #[test]
    fn push_respects_maximum() {
        let mut state = ArrayInputState::new(strings(&["a"]), 1, Some(2));
        assert!(state.push("b").is_ok());
        assert!(!state.can_add());
        assert_eq!(state.push("c"), Err(ArrayInputError::Full { max_items: 2 }));
        assert_eq!(state.items, strings(&["a", "b"]));
    }

    #[test]
    fn remove_respects_minimum_and_bounds() {
        let mut state = ArrayInputState::new(strings(&["a", "b"]), 1, None);
        assert_eq!(state.remove(5), Err(ArrayInputError::OutOfRange { index: 5 }));
        assert_eq!(state.remove(0), Ok("a".to_string()));
        assert_eq!(
            state.remove(0),
            Err(ArrayInputError::AtMinimum { min_items: 1 })
        );
        assert_eq!(
            ArrayInputError::AtMinimum { min_items: 1 }.to_string(),
            "At least 1 items required"
        );
        assert_eq!(state.items, strings(&["b"]));
    }

    #[test]
    fn update_edits_in_place_and_ignores_bad_index() {
        let mut state = ArrayInputState::new(strings(&["a", "b"]), 0, None);
        state.update(1, "beta");
        state.update(9, "nope");
        assert_eq!(state.items, strings(&["a", "beta"]));
    }

    #[test]
    fn submitted_values_are_trimmed_without_blanks() {
        let state = ArrayInputState::new(strings(&[" first ", "", "   ", "second"]), 1, None);
        assert_eq!(state.non_empty_values(), strings(&["first", "second"]));
    }
}
