//! API Access
//!
//! HTTP calls to the dashboard API and their payload types.

pub mod client;

pub use client::{fetch_activity, get_api_base, ActivityEntry};
