use std::collections::{HashMap, HashSet};

use crate::poll::{OptionId, PostId};

/// Options checked but not yet submitted, per multi-select poll. Sets are
/// created on first toggle and live only for the page session; single-select
/// polls never touch this, their click submits immediately.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selected: HashMap<PostId, HashSet<OptionId>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one option and report whether it is now selected. Toggling the
    /// same option twice always lands back where it started.
    pub fn toggle(&mut self, post_id: PostId, option_id: OptionId) -> bool {
        let set = self.selected.entry(post_id).or_default();
        if set.remove(&option_id) {
            false
        } else {
            set.insert(option_id);
            true
        }
    }

    /// Current picks for a poll, in stable ascending order.
    pub fn selected(&self, post_id: PostId) -> Vec<OptionId> {
        let mut ids: Vec<OptionId> = self
            .selected
            .get(&post_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self, post_id: PostId) -> bool {
        self.selected.get(&post_id).is_none_or(HashSet::is_empty)
    }

    /// Forget a poll's picks. Called only once the server confirmed the vote;
    /// failed submissions keep the set so the user can retry.
    pub fn clear(&mut self, post_id: PostId) {
        self.selected.remove(&post_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_parity_determines_membership() {
        let mut tracker = SelectionTracker::new();
        for round in 1..=6 {
            let now_selected = tracker.toggle(1, 10);
            assert_eq!(now_selected, round % 2 == 1);
            assert_eq!(!tracker.is_empty(1), round % 2 == 1);
        }
    }

    #[test]
    fn posts_are_tracked_independently() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(1, 10);
        tracker.toggle(2, 10);
        tracker.toggle(2, 11);
        assert_eq!(tracker.selected(1), vec![10]);
        assert_eq!(tracker.selected(2), vec![10, 11]);

        tracker.clear(2);
        assert!(tracker.is_empty(2));
        assert_eq!(tracker.selected(1), vec![10]);
    }

    #[test]
    fn unknown_post_is_empty() {
        let tracker = SelectionTracker::new();
        assert!(tracker.is_empty(99));
        assert!(tracker.selected(99).is_empty());
    }
}
