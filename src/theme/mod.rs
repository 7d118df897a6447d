//! Theme State
//!
//! The application-wide theme holder and the transition choreography that
//! reacts to its pulses.

mod holder;
mod palette;
mod transition;

pub use holder::{ThemeHolder, ThemeSignal, ThemeWatcher};
pub use palette::{Streak, StreakPalette, DARK_PALETTE, LIGHT_PALETTE};
pub use transition::{
    Phase, Step, ThemeTransitionController, TransitionFrame, TransitionOverlay, PHASE_SCHEDULE,
    TRANSITION_DURATION,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolved dashboard theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The theme that is not `self`
    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: {0} (expected \"light\" or \"dark\")")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}
