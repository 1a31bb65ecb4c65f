//! Selection set over stable entry ids
//!
//! Membership survives re-renders, additive page loads, and free-text
//! filtering of an already-loaded set; it is cleared at the start of every
//! remote re-query and by the explicit clear/deselect actions. Select-all
//! and deselect-all are absorbing operations, not toggles of a snapshot.

use std::collections::BTreeSet;

/// Set of selected entry ids
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for one id; returns whether it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Add every id currently shown to the selection
    pub fn select_all<'a>(&mut self, shown: impl IntoIterator<Item = &'a str>) {
        self.ids.extend(shown.into_iter().map(str::to_string));
    }

    /// Empty the selection regardless of prior state
    pub fn deselect_all(&mut self) {
        self.clear();
    }

    /// Empty the selection
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether the given id is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tri-state select-all control predicate
    ///
    /// True exactly when the selection covers every shown id and something
    /// is shown; the control's intent flips to "deselect all" at that point.
    pub fn all_shown_selected<'a>(&self, shown: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in shown {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }

    /// Selected ids in stable order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
