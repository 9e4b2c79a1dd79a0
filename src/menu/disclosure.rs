//! Open/closed state of menu disclosures for one menu instance.

use std::collections::{HashMap, HashSet};

/// Per-node disclosure state.
///
/// At most one root disclosure is open at a time; nested disclosures are
/// independent of each other. Closing a node never touches its siblings or
/// ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureState {
    roots: HashSet<i64>,
    open: HashMap<i64, bool>,
}

impl DisclosureState {
    /// Fresh state for a menu whose top-level entries are `root_ids`.
    pub fn new(root_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            roots: root_ids.into_iter().collect(),
            open: HashMap::new(),
        }
    }

    pub fn is_open(&self, id: i64) -> bool {
        self.open.get(&id).copied().unwrap_or(false)
    }

    pub fn open(&mut self, id: i64) {
        if self.roots.contains(&id) {
            for root in &self.roots {
                if *root != id {
                    self.open.insert(*root, false);
                }
            }
        }
        self.open.insert(id, true);
    }

    pub fn close(&mut self, id: i64) {
        self.open.insert(id, false);
    }

    pub fn toggle(&mut self, id: i64) {
        if self.is_open(id) {
            self.close(id);
        } else {
            self.open(id);
        }
    }

    /// Close everything, as after a navigation.
    pub fn reset(&mut self) {
        self.open.clear();
    }

    /// Ids currently open, sorted.
    pub fn open_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .open
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let state = DisclosureState::new([1, 2]);
        assert!(!state.is_open(1));
        assert!(state.open_ids().is_empty());
    }

    #[test]
    fn test_opening_root_closes_other_root() {
        let mut state = DisclosureState::new([1, 2, 3]);
        state.open(1);
        state.open(2);

        assert!(!state.is_open(1));
        assert!(state.is_open(2));
        assert_eq!(state.open_ids(), vec![2]);
    }

    #[test]
    fn test_nested_toggle_keeps_root_open() {
        let mut state = DisclosureState::new([1, 2]);
        state.open(1);
        state.toggle(2);
        state.toggle(20);

        assert!(state.is_open(2));
        assert!(state.is_open(20));
        assert!(!state.is_open(1));
    }

    #[test]
    fn test_nested_disclosures_are_independent() {
        let mut state = DisclosureState::new([1]);
        state.open(1);
        state.open(10);
        state.open(11);
        state.close(10);

        assert!(state.is_open(1));
        assert!(!state.is_open(10));
        assert!(state.is_open(11));
    }

    #[test]
    fn test_closing_root_leaves_nested_state() {
        let mut state = DisclosureState::new([1]);
        state.open(1);
        state.open(10);
        state.close(1);

        assert!(!state.is_open(1));
        assert!(state.is_open(10));
    }

    #[test]
    fn test_toggle_root_twice() {
        let mut state = DisclosureState::new([1]);
        state.toggle(1);
        assert!(state.is_open(1));
        state.toggle(1);
        assert!(!state.is_open(1));
    }

    #[test]
    fn test_reset_closes_all() {
        let mut state = DisclosureState::new([1]);
        state.open(1);
        state.open(10);
        state.reset();
        assert!(state.open_ids().is_empty());
    }
}
