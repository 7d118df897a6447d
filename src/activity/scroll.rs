//! Auto-scroll Coupling
//!
//! The viewer jumps to the newest entry whenever the displayed list changes,
//! and only then. Re-renders that leave the list as it was do not scroll, so
//! they never fight a user who is reading older entries.

use std::sync::Arc;

use super::entry::ActivityEntry;
use super::feed::FeedSnapshot;

#[derive(Debug, Default)]
pub struct AutoScroll {
    last: Option<Arc<Vec<ActivityEntry>>>,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` when the viewer should scroll to the bottom
    pub fn observe(&mut self, snapshot: &FeedSnapshot) -> bool {
        let current = &snapshot.entries;
        let changed = match &self.last {
            Some(prev) => !Arc::ptr_eq(prev, current) && prev != current,
            None => !current.is_empty(),
        };

        self.last = Some(current.clone());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityKind, FeedState, FetchTag, SubjectId};

    fn entry(message: &str) -> ActivityEntry {
        ActivityEntry::new("2024-05-01T10:00:00Z", ActivityKind::Info, message)
    }

    #[test]
    fn test_scrolls_only_on_content_change() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));
        let mut scroll = AutoScroll::new();

        // Nothing to show yet
        assert!(!scroll.observe(&feed.snapshot()));

        feed.apply(FetchTag { generation, seq: 1 }, vec![entry("a")]);
        assert!(scroll.observe(&feed.snapshot()));

        // Unrelated re-render
        assert!(!scroll.observe(&feed.snapshot()));

        // Identical refetch
        feed.apply(FetchTag { generation, seq: 2 }, vec![entry("a")]);
        assert!(!scroll.observe(&feed.snapshot()));

        feed.apply(FetchTag { generation, seq: 3 }, vec![entry("a"), entry("b")]);
        assert!(scroll.observe(&feed.snapshot()));
    }

    #[test]
    fn test_failure_bookkeeping_does_not_scroll() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));
        let mut scroll = AutoScroll::new();

        feed.apply(FetchTag { generation, seq: 1 }, vec![entry("a")]);
        assert!(scroll.observe(&feed.snapshot()));

        feed.record_failure(FetchTag { generation, seq: 2 });
        assert!(!scroll.observe(&feed.snapshot()));
    }
}
