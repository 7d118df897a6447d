//! Activity Feed
//!
//! Polls an analysis activity log and keeps the latest snapshot for display:
//! - [`ActivitySource`] fetches one snapshot (HTTP in production)
//! - [`ActivityFeedPoller`] runs the fetch loop for one `(subject, active)` binding
//! - [`FeedState`] holds the displayed list and rejects stale results
//! - [`AutoScroll`] tells the viewer when to jump to the newest entry

mod client;
mod entry;
mod error;
mod feed;
mod poller;
mod scroll;

pub use client::{ActivitySource, HttpActivitySource};
pub use entry::{parse_activity_log, ActivityEntry, ActivityKind, ActivityLog, EntryStyle};
pub use error::{FeedError, FeedResult};
pub use feed::{FeedSnapshot, FeedState, FetchTag};
pub use poller::{ActivityFeedPoller, FeedSubscription};
pub use scroll::AutoScroll;

use std::fmt;
use std::time::Duration;

/// Refetch period while a subscription is active
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Opaque key naming the activity log to follow
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&SubjectId> for SubjectId {
    fn from(id: &SubjectId) -> Self {
        id.clone()
    }
}
