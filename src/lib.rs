//! # Vantage
//!
//! Client-side core of the analysis dashboard: the theme-switch transition
//! choreography and the polling activity-log viewer.
//!
//! ## Features
//!
//! - **Theme holder**: a single application-scoped owner of the current theme
//!   that consumers observe through a read-only watcher
//! - **Transition controller**: a timed `splash → spread → fade → idle`
//!   state machine with one cancellation handle per activation
//! - **Activity feed**: a cancellable periodic poller that replaces the
//!   displayed log wholesale and discards stale responses
//!
//! ## Modules
//!
//! - [`theme`]: Theme holder, streak palettes and the transition controller
//! - [`activity`]: Activity entries, the HTTP source and the feed poller
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Console and file diagnostics via `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vantage::activity::{ActivityFeedPoller, HttpActivitySource};
//! use vantage::config::Config;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let source = Arc::new(HttpActivitySource::new(&config.api)?);
//!
//!     let poller = ActivityFeedPoller::new(source).with_interval(config.feed.poll_interval());
//!     let subscription = poller.start("analysis-42", true);
//!
//!     let mut view = subscription.view();
//!     while view.changed().await.is_ok() {
//!         println!("{} entries", view.borrow().entries.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod config;
pub mod logging;
pub mod theme;
pub mod timer;

pub use activity::{
    parse_activity_log, ActivityEntry, ActivityFeedPoller, ActivityKind, ActivityLog,
    ActivitySource, AutoScroll, EntryStyle, FeedError, FeedResult, FeedSnapshot, FeedState,
    FeedSubscription, FetchTag, HttpActivitySource, SubjectId, DEFAULT_POLL_INTERVAL,
};

pub use theme::{
    Phase, Streak, StreakPalette, Theme, ThemeHolder, ThemeSignal, ThemeTransitionController,
    ThemeWatcher, TransitionFrame, TransitionOverlay, PHASE_SCHEDULE, TRANSITION_DURATION,
};

pub use config::{ApiConfig, Config, ConfigError, FeedConfig, LoggingConfig};

pub use logging::{init_logging, open_log_file, LoggingError};

pub use timer::TaskSlot;
