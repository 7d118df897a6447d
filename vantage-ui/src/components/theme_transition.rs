//! Theme Transition Overlay
//!
//! Full-screen streak animation played on every theme toggle:
//! splash, spread at +50ms, fade at +800ms, torn down at +1200ms.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::state::theme::{use_theme, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Splash,
    Spread,
    Fade,
}

impl Phase {
    pub fn css_class(self) -> &'static str {
        match self {
            Phase::Idle => "transition-idle",
            Phase::Splash => "transition-splash",
            Phase::Spread => "transition-spread",
            Phase::Fade => "transition-fade",
        }
    }
}

/// Offsets from activation, in firing order
pub const PHASE_SCHEDULE: [(u32, Phase); 3] = [
    (50, Phase::Spread),
    (800, Phase::Fade),
    (1200, Phase::Idle),
];

const DARK_COLORS: &[&str] = &["#6366f1", "#8b5cf6", "#a855f7", "#3b82f6", "#0ea5e9"];
const LIGHT_COLORS: &[&str] = &["#fbbf24", "#f59e0b", "#fb923c", "#fde68a"];

#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    pub color: &'static str,
    pub angle_deg: f32,
    pub delay_ms: u32,
    pub length_pct: u8,
}

/// Streaks for the theme being switched to
pub fn streaks(theme: Theme) -> Vec<Streak> {
    let (colors, count) = match theme {
        Theme::Dark => (DARK_COLORS, 12),
        Theme::Light => (LIGHT_COLORS, 8),
    };

    (0..count)
        .map(|i| Streak {
            color: colors[i % colors.len()],
            angle_deg: 360.0 / count as f32 * i as f32,
            delay_ms: (i % 4) as u32 * 40,
            length_pct: 60 + (i * 17 % 40) as u8,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Overlay {
    theme: Theme,
    previous_theme: Theme,
    streaks: Vec<Streak>,
}

/// Overlay driven by the theme context's toggle pulse
#[component]
pub fn ThemeTransition() -> impl IntoView {
    let ctx = use_theme();
    let phase = create_rw_signal(Phase::Idle);
    let overlay = create_rw_signal(None::<Overlay>);

    // Pending steps of the current activation; dropping a Timeout cancels it
    let steps = store_value(Vec::<Timeout>::new());

    create_effect(move |_| {
        let _ = ctx.pulse.get();
        if !ctx.is_transitioning.get_untracked() {
            return;
        }

        let theme = ctx.theme.get_untracked();
        steps.update_value(|pending| pending.clear());

        overlay.set(Some(Overlay {
            theme,
            previous_theme: theme.opposite(),
            streaks: streaks(theme),
        }));
        phase.set(Phase::Splash);

        let scheduled = PHASE_SCHEDULE
            .iter()
            .map(|&(at, next)| {
                Timeout::new(at, move || {
                    phase.set(next);
                    if next == Phase::Idle {
                        overlay.set(None);
                    }
                })
            })
            .collect();
        steps.set_value(scheduled);
    });

    on_cleanup(move || {
        let _ = steps.try_update_value(|pending| pending.clear());
    });

    move || {
        overlay.get().map(|o| {
            let class = format!(
                "theme-transition fixed inset-0 pointer-events-none z-50 {} from-{} to-{}",
                phase.get().css_class(),
                o.previous_theme.as_str(),
                o.theme.as_str()
            );

            view! {
                <div class=class aria-hidden="true">
                    {o.streaks.into_iter().map(|s| view! {
                        <span
                            class="theme-streak"
                            style=format!(
                                "background:{};transform:rotate({}deg);animation-delay:{}ms;height:{}%",
                                s.color, s.angle_deg, s.delay_ms, s.length_pct
                            )
                        />
                    }).collect_view()}
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_ordered() {
        let offsets: Vec<u32> = PHASE_SCHEDULE.iter().map(|(at, _)| *at).collect();
        assert_eq!(offsets, vec![50, 800, 1200]);
        assert_eq!(PHASE_SCHEDULE[2].1, Phase::Idle);
    }

    #[test]
    fn test_streak_counts() {
        assert_eq!(streaks(Theme::Dark).len(), 12);
        assert_eq!(streaks(Theme::Light).len(), 8);
        assert!(streaks(Theme::Light).iter().all(|s| LIGHT_COLORS.contains(&s.color)));
    }
}
