//! Theme Holder
//!
//! Application-scoped owner of the current theme. The holder is the only
//! writer; every other consumer gets a [`ThemeWatcher`] and can only observe.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;

use super::transition::TRANSITION_DURATION;
use super::Theme;
use crate::timer::TaskSlot;

/// Snapshot of the holder's observable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSignal {
    pub theme: Theme,
    /// Raised when a switch begins, lowered once the switch has settled
    pub is_transitioning: bool,
    /// Incremented on every raise so two pulses are never mistaken for one
    pub pulse: u64,
}

/// Process-wide theme owner.
///
/// Cloning the holder shares the same state; it is meant to be created once
/// at application start and passed by reference to the views that need it.
#[derive(Clone)]
pub struct ThemeHolder {
    inner: Arc<HolderInner>,
}

struct HolderInner {
    tx: watch::Sender<ThemeSignal>,
    settle: Mutex<TaskSlot>,
    pulse_width: Duration,
}

impl ThemeHolder {
    /// Create a holder with the given initial theme
    pub fn new(theme: Theme) -> Self {
        Self::with_pulse_width(theme, TRANSITION_DURATION)
    }

    /// Create a holder whose transitioning pulse stays raised for `pulse_width`
    pub fn with_pulse_width(theme: Theme, pulse_width: Duration) -> Self {
        let (tx, _) = watch::channel(ThemeSignal {
            theme,
            is_transitioning: false,
            pulse: 0,
        });

        Self {
            inner: Arc::new(HolderInner {
                tx,
                settle: Mutex::new(TaskSlot::new()),
                pulse_width,
            }),
        }
    }

    pub fn theme(&self) -> Theme {
        self.inner.tx.borrow().theme
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.tx.borrow().is_transitioning
    }

    pub fn signal(&self) -> ThemeSignal {
        *self.inner.tx.borrow()
    }

    /// Observe the holder without the ability to mutate it
    pub fn subscribe(&self) -> ThemeWatcher {
        ThemeWatcher {
            rx: self.inner.tx.subscribe(),
        }
    }

    /// Flip the theme and raise the transitioning pulse.
    ///
    /// Must be called from within a Tokio runtime: the pulse is lowered by a
    /// timer once the switch has settled.
    pub fn toggle_theme(&self) {
        let mut raised = 0;
        self.inner.tx.send_modify(|signal| {
            signal.theme = signal.theme.opposite();
            signal.is_transitioning = true;
            signal.pulse += 1;
            raised = signal.pulse;
        });

        tracing::debug!(theme = %self.theme(), pulse = raised, "Theme toggled");
        self.schedule_settle(raised);
    }

    /// Switch to `theme`, behaving like [`toggle_theme`](Self::toggle_theme)
    /// when it differs from the current one
    pub fn set_theme(&self, theme: Theme) {
        if self.theme() != theme {
            self.toggle_theme();
        }
    }

    fn schedule_settle(&self, pulse: u64) {
        let weak: Weak<HolderInner> = Arc::downgrade(&self.inner);
        let delay = self.inner.pulse_width;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.tx.send_if_modified(|signal| {
                    if signal.pulse == pulse && signal.is_transitioning {
                        signal.is_transitioning = false;
                        true
                    } else {
                        false
                    }
                });
            }
        });

        self.inner
            .settle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
    }
}

impl Default for ThemeHolder {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Read-only view of a [`ThemeHolder`]
#[derive(Debug, Clone)]
pub struct ThemeWatcher {
    rx: watch::Receiver<ThemeSignal>,
}

impl ThemeWatcher {
    /// Current state, marking it as seen
    pub fn current(&mut self) -> ThemeSignal {
        *self.rx.borrow_and_update()
    }

    /// Wait for the next change.
    ///
    /// Returns `None` once the holder has been dropped.
    pub async fn changed(&mut self) -> Option<ThemeSignal> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
