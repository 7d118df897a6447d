//! Theme State
//!
//! One owner of the current theme for the whole app. Components read it
//! through [`use_theme`]; only [`ThemeContext::toggle_theme`] changes it.

use gloo_timers::callback::Timeout;
use leptos::*;

/// Time from a toggle until the switch has settled
pub const TRANSITION_MS: u32 = 1200;

/// Local storage key for the last chosen theme
const THEME_KEY: &str = "vantage_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
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

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Theme state provided to all components
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
    /// Raised on every toggle, lowered once the switch has settled
    pub is_transitioning: RwSignal<bool>,
    /// Incremented on every toggle so back-to-back toggles are distinct
    pub pulse: RwSignal<u64>,
    settle: StoredValue<Option<Timeout>>,
}

impl ThemeContext {
    /// Flip the theme and raise the transitioning pulse
    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().opposite();

        batch(|| {
            self.theme.set(next);
            self.is_transitioning.set(true);
            self.pulse.update(|p| *p += 1);
        });
        apply_document_theme(next);

        // Replacing the previous timeout cancels it
        let flag = self.is_transitioning;
        self.settle.set_value(Some(Timeout::new(TRANSITION_MS, move || {
            flag.set(false);
        })));
    }
}

/// Provide theme state to the component tree
pub fn provide_theme_context() {
    let initial = stored_theme().unwrap_or_default();
    apply_document_theme(initial);

    let ctx = ThemeContext {
        theme: create_rw_signal(initial),
        is_transitioning: create_rw_signal(false),
        pulse: create_rw_signal(0),
        settle: store_value(None),
    };

    on_cleanup(move || {
        let _ = ctx.settle.try_set_value(None);
    });

    provide_context(ctx);
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found")
}

fn stored_theme() -> Option<Theme> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten())
        .and_then(|value| Theme::parse(&value))
}

/// Mirror the theme onto `<html class="dark">` and persist it
fn apply_document_theme(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };

    if let Some(root) = window.document().and_then(|doc| doc.document_element()) {
        let _ = root.class_list().toggle_with_force("dark", theme == Theme::Dark);
    }
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}
