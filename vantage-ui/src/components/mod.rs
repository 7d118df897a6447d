//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod activity_feed;
pub mod nav;
pub mod theme_transition;

pub use activity_feed::ActivityFeed;
pub use nav::Nav;
pub use theme_transition::ThemeTransition;
