//! State Management
//!
//! Application-scoped theme state shared through context.

pub mod theme;
