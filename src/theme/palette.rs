//! Streak Palettes
//!
//! Colors and counts of the light streaks drawn during a theme switch.

use super::Theme;

/// Streak colors and count for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakPalette {
    pub colors: &'static [&'static str],
    pub count: usize,
}

/// Cool indigo/violet streaks used when switching into dark mode
pub const DARK_PALETTE: StreakPalette = StreakPalette {
    colors: &["#6366f1", "#8b5cf6", "#a855f7", "#3b82f6", "#0ea5e9"],
    count: 12,
};

/// Warm amber streaks used when switching into light mode
pub const LIGHT_PALETTE: StreakPalette = StreakPalette {
    colors: &["#fbbf24", "#f59e0b", "#fb923c", "#fde68a"],
    count: 8,
};

/// One streak of the transition overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    pub color: &'static str,
    /// Direction from the splash origin, in degrees
    pub angle_deg: f32,
    /// Delay after the spread phase begins
    pub delay_ms: u32,
    /// Length as a percentage of the viewport diagonal
    pub length_pct: u8,
}

impl StreakPalette {
    pub fn for_theme(theme: Theme) -> &'static StreakPalette {
        match theme {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }

    /// Lay out `count` streaks evenly around the origin.
    ///
    /// The layout depends only on the palette, so a transition's streaks never
    /// change once computed.
    pub fn streaks(&self) -> Vec<Streak> {
        let step = 360.0 / self.count.max(1) as f32;

        (0..self.count)
            .map(|i| Streak {
                color: self.colors[i % self.colors.len()],
                angle_deg: step * i as f32,
                delay_ms: (i % 4) as u32 * 40,
                length_pct: 60 + ((i * 17) % 40) as u8,
            })
            .collect()
    }
}
