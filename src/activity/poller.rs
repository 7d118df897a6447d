//! Activity Feed Poller
//!
//! Fetches a subject's activity log once when bound and, while active, again
//! on every tick of a fixed-period timer. Each binding runs as one task owned
//! by its [`FeedSubscription`]; rebinding or stopping aborts it before
//! anything new is armed.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use super::client::ActivitySource;
use super::feed::{FeedSnapshot, FeedState, FetchTag};
use super::{SubjectId, DEFAULT_POLL_INTERVAL};
use crate::timer::TaskSlot;

/// Factory for feed subscriptions sharing one source and period
#[derive(Clone)]
pub struct ActivityFeedPoller {
    source: Arc<dyn ActivitySource>,
    interval: Duration,
}

impl ActivityFeedPoller {
    pub fn new(source: Arc<dyn ActivitySource>) -> Self {
        Self {
            source,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the refetch period (clamped to at least 1ms)
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Bind a new subscription and issue its first fetch.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, subject: impl Into<SubjectId>, active: bool) -> FeedSubscription {
        let mut subscription = FeedSubscription {
            source: self.source.clone(),
            interval: self.interval,
            feed: Arc::new(FeedState::new()),
            binding: None,
            task: TaskSlot::new(),
        };
        subscription.update(subject, active);
        subscription
    }
}

/// A live `(subject, active)` binding and the list it displays
pub struct FeedSubscription {
    source: Arc<dyn ActivitySource>,
    interval: Duration,
    feed: Arc<FeedState>,
    binding: Option<(SubjectId, bool)>,
    task: TaskSlot,
}

impl FeedSubscription {
    /// Rebind to `(subject, active)`.
    ///
    /// Identical inputs are a no-op. Otherwise the running loop is cancelled
    /// first, outstanding fetches are invalidated, and a fresh loop is armed.
    pub fn update(&mut self, subject: impl Into<SubjectId>, active: bool) {
        let subject = subject.into();
        if self
            .binding
            .as_ref()
            .is_some_and(|(current, was_active)| *current == subject && *was_active == active)
        {
            return;
        }

        self.task.cancel();
        let generation = self.feed.rebind(&subject);
        self.binding = Some((subject.clone(), active));

        if subject.is_empty() {
            tracing::debug!("No subject bound; activity polling idle");
            return;
        }

        tracing::debug!(subject = %subject, active, generation, "Activity feed bound");

        let poll = PollLoop {
            source: self.source.clone(),
            feed: self.feed.clone(),
            subject,
            generation,
            interval: self.interval,
        };

        let handle = if active {
            tokio::spawn(poll.run())
        } else {
            tokio::spawn(async move { poll.fetch_once(1).await })
        };
        self.task.replace(handle);
    }

    /// Cancel the loop and invalidate in-flight fetches. The last snapshot
    /// stays readable.
    pub fn stop(&mut self) {
        let was_armed = self.task.cancel();
        self.feed.unbind();

        if let Some((subject, _)) = self.binding.take() {
            tracing::debug!(subject = %subject, was_armed, "Activity feed stopped");
        }
    }

    pub fn subject(&self) -> Option<&SubjectId> {
        self.binding.as_ref().map(|(subject, _)| subject)
    }

    pub fn is_active(&self) -> bool {
        self.binding.as_ref().is_some_and(|(_, active)| *active)
    }

    /// Whether a fetch loop or one-shot fetch is still running
    pub fn is_armed(&self) -> bool {
        self.task.is_armed()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.feed.snapshot()
    }

    /// Subscribe to displayed-list changes
    pub fn view(&self) -> watch::Receiver<FeedSnapshot> {
        self.feed.subscribe()
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything one binding's task needs
#[derive(Clone)]
struct PollLoop {
    source: Arc<dyn ActivitySource>,
    feed: Arc<FeedState>,
    subject: SubjectId,
    generation: u64,
    interval: Duration,
}

impl PollLoop {
    /// Fetch on every tick, measured from the arm time rather than from the
    /// previous completion, so slow fetches may overlap. Dropping the task
    /// drops the join set, which aborts every fetch still in flight.
    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight = JoinSet::new();
        let mut seq = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    seq += 1;
                    let poll = self.clone();
                    in_flight.spawn(async move { poll.fetch_once(seq).await });
                }
                Some(joined) = in_flight.join_next() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            tracing::error!(subject = %self.subject, "Activity fetch panicked");
                        }
                    }
                }
            }
        }
    }

    async fn fetch_once(&self, seq: u64) {
        let tag = FetchTag {
            generation: self.generation,
            seq,
        };

        match self.source.fetch_log(&self.subject).await {
            Ok(entries) => {
                let count = entries.len();
                if self.feed.apply(tag, entries) {
                    tracing::debug!(subject = %self.subject, seq, count, "Activity snapshot applied");
                } else {
                    tracing::debug!(subject = %self.subject, seq, "Discarded stale activity snapshot");
                }
            }
            Err(e) => match self.feed.record_failure(tag) {
                Some(failures) => tracing::warn!(
                    subject = %self.subject,
                    kind = e.kind(),
                    failures,
                    "Activity fetch failed, keeping last snapshot: {}",
                    e
                ),
                None => tracing::debug!(
                    subject = %self.subject,
                    "Stale activity fetch failed: {}",
                    e
                ),
            },
        }
    }
}
