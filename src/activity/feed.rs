//! Displayed Feed State
//!
//! The entry list a viewer renders, plus the bookkeeping that decides which
//! fetch results may replace it.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use super::entry::ActivityEntry;
use super::SubjectId;

/// Identifies the fetch a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTag {
    /// Binding generation the fetch was issued under
    pub generation: u64,
    /// Issue order within the generation, starting at 1
    pub seq: u64,
}

/// What the viewer renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedSnapshot {
    pub subject: Option<SubjectId>,
    pub entries: Arc<Vec<ActivityEntry>>,
    /// Incremented whenever `entries` is replaced or cleared
    pub revision: u64,
    pub last_updated: Option<DateTime<Utc>>,
    /// Failed fetches since the last success; diagnostic only
    pub consecutive_failures: u32,
    generation: u64,
    applied_seq: u64,
}

impl FeedSnapshot {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Single-writer store for the displayed list
#[derive(Debug)]
pub struct FeedState {
    tx: watch::Sender<FeedSnapshot>,
}

impl FeedState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(FeedSnapshot::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.tx.subscribe()
    }

    /// Start a new generation for `subject`.
    ///
    /// Results tagged with any earlier generation are discarded from now on.
    /// Switching to a different subject clears the list so entries of the old
    /// subject are never shown under the new one.
    pub fn rebind(&self, subject: &SubjectId) -> u64 {
        let target = (!subject.is_empty()).then(|| subject.clone());
        let mut generation = 0;

        self.tx.send_if_modified(|snap| {
            snap.generation += 1;
            snap.applied_seq = 0;
            generation = snap.generation;

            if snap.subject == target {
                return false;
            }

            let had_entries = !snap.entries.is_empty();
            snap.subject = target;
            snap.consecutive_failures = 0;
            snap.last_updated = None;
            if had_entries {
                snap.entries = Arc::new(Vec::new());
                snap.revision += 1;
            }
            true
        });

        generation
    }

    /// Invalidate every outstanding fetch, keeping the list as is
    pub fn unbind(&self) {
        self.tx.send_if_modified(|snap| {
            snap.generation += 1;
            false
        });
    }

    /// Replace the list with a fetched snapshot.
    ///
    /// Returns `false` (and changes nothing) when the result is stale: issued
    /// under an older generation, or older than a result already applied.
    pub fn apply(&self, tag: FetchTag, entries: Vec<ActivityEntry>) -> bool {
        self.tx.send_if_modified(|snap| {
            if tag.generation != snap.generation || tag.seq <= snap.applied_seq {
                return false;
            }

            snap.entries = Arc::new(entries);
            snap.revision += 1;
            snap.applied_seq = tag.seq;
            snap.last_updated = Some(Utc::now());
            snap.consecutive_failures = 0;
            true
        })
    }

    /// Count a failed fetch against the live generation.
    ///
    /// Returns the new failure count, or `None` for a stale fetch: one from
    /// an older generation, or one issued before the last applied result.
    pub fn record_failure(&self, tag: FetchTag) -> Option<u32> {
        let mut count = None;
        self.tx.send_if_modified(|snap| {
            if tag.generation != snap.generation || tag.seq <= snap.applied_seq {
                return false;
            }
            snap.consecutive_failures += 1;
            count = Some(snap.consecutive_failures);
            true
        });
        count
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;

    fn entries(n: usize) -> Vec<ActivityEntry> {
        (0..n)
            .map(|i| {
                ActivityEntry::new(
                    format!("2024-05-01T10:00:{:02}Z", i),
                    ActivityKind::Info,
                    format!("entry {}", i),
                )
            })
            .collect()
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));

        assert!(feed.apply(FetchTag { generation, seq: 1 }, entries(3)));
        assert_eq!(feed.snapshot().entries.len(), 3);

        assert!(feed.apply(FetchTag { generation, seq: 2 }, entries(1)));
        let snap = feed.snapshot();
        assert_eq!(*snap.entries, entries(1));
        assert_eq!(snap.revision, 2);
        assert!(snap.last_updated.is_some());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let feed = FeedState::new();
        let old = feed.rebind(&SubjectId::from("A"));
        let new = feed.rebind(&SubjectId::from("B"));
        assert!(new > old);

        assert!(!feed.apply(FetchTag { generation: old, seq: 1 }, entries(5)));
        assert!(feed.snapshot().entries.is_empty());
        assert_eq!(feed.record_failure(FetchTag { generation: old, seq: 1 }), None);
    }

    #[test]
    fn test_out_of_order_result_is_discarded() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));

        assert!(feed.apply(FetchTag { generation, seq: 2 }, entries(4)));
        assert!(!feed.apply(FetchTag { generation, seq: 1 }, entries(2)));
        assert_eq!(feed.snapshot().entries.len(), 4);
    }

    #[test]
    fn test_failure_older_than_applied_is_ignored() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));

        assert!(feed.apply(FetchTag { generation, seq: 2 }, entries(3)));
        assert_eq!(feed.record_failure(FetchTag { generation, seq: 1 }), None);
        assert_eq!(feed.record_failure(FetchTag { generation, seq: 2 }), None);

        let snap = feed.snapshot();
        assert_eq!(snap.consecutive_failures, 0);
        assert_eq!(snap.entries.len(), 3);

        assert_eq!(feed.record_failure(FetchTag { generation, seq: 3 }), Some(1));
    }

    #[test]
    fn test_subject_change_clears_list() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));
        feed.apply(FetchTag { generation, seq: 1 }, entries(3));

        // Same subject keeps the list
        feed.rebind(&SubjectId::from("A"));
        assert_eq!(feed.snapshot().entries.len(), 3);

        feed.rebind(&SubjectId::from("B"));
        let snap = feed.snapshot();
        assert!(snap.entries.is_empty());
        assert_eq!(snap.subject, Some(SubjectId::from("B")));
    }

    #[test]
    fn test_failures_reset_on_success() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));
        let tag = |seq| FetchTag { generation, seq };

        feed.apply(tag(1), entries(2));
        assert_eq!(feed.record_failure(tag(2)), Some(1));
        assert_eq!(feed.record_failure(tag(3)), Some(2));
        assert_eq!(feed.snapshot().entries.len(), 2);

        feed.apply(tag(4), entries(1));
        assert_eq!(feed.snapshot().consecutive_failures, 0);
    }

    #[test]
    fn test_unbind_invalidates_in_flight() {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("A"));
        feed.unbind();
        assert!(!feed.apply(FetchTag { generation, seq: 1 }, entries(1)));
    }
}
