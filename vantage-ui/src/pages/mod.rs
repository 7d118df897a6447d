//! Page Components
//!
//! Top-level route views.

pub mod analysis;
pub mod home;

pub use analysis::Analysis;
pub use home::Home;
