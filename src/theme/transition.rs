//! Theme Transition Controller
//!
//! Runs the `splash → spread → fade → idle` choreography every time the theme
//! holder raises its transitioning pulse. The choreography is a fixed table of
//! steps measured from the activation instant. Each activation is driven by a
//! single task, so restarting or tearing down cancels the whole group at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use super::holder::ThemeWatcher;
use super::palette::{Streak, StreakPalette};
use super::Theme;
use crate::timer::TaskSlot;

/// Visual phase of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Splash,
    Spread,
    Fade,
}

impl Phase {
    pub fn is_active(self) -> bool {
        self != Phase::Idle
    }

    /// CSS class applied to the overlay while in this phase
    pub fn css_class(self) -> &'static str {
        match self {
            Phase::Idle => "transition-idle",
            Phase::Splash => "transition-splash",
            Phase::Spread => "transition-spread",
            Phase::Fade => "transition-fade",
        }
    }
}

/// One row of the schedule: `at` after activation, enter `phase`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub at: Duration,
    pub phase: Phase,
}

/// Steps that follow the initial splash, in firing order
pub const PHASE_SCHEDULE: [Step; 3] = [
    Step {
        at: Duration::from_millis(50),
        phase: Phase::Spread,
    },
    Step {
        at: Duration::from_millis(800),
        phase: Phase::Fade,
    },
    Step {
        at: Duration::from_millis(1200),
        phase: Phase::Idle,
    },
];

/// Time from activation until the overlay is torn down
pub const TRANSITION_DURATION: Duration = Duration::from_millis(1200);

/// Visual parameters fixed for the lifetime of one activation
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOverlay {
    pub theme: Theme,
    pub previous_theme: Theme,
    pub streaks: Vec<Streak>,
}

impl TransitionOverlay {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            previous_theme: theme.opposite(),
            streaks: StreakPalette::for_theme(theme).streaks(),
        }
    }
}

/// What the renderer should draw right now.
///
/// `overlay` is `None` exactly when the phase is idle: the overlay is torn
/// down rather than hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionFrame {
    pub phase: Phase,
    pub overlay: Option<Arc<TransitionOverlay>>,
    /// Incremented on every activation and on teardown
    pub activation: u64,
}

/// Drives transition frames from theme pulses
pub struct ThemeTransitionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    frames: watch::Sender<TransitionFrame>,
    tasks: Mutex<ControllerTasks>,
    stopped: AtomicBool,
}

#[derive(Default)]
struct ControllerTasks {
    schedule: TaskSlot,
    observer: TaskSlot,
}

impl ThemeTransitionController {
    pub fn new() -> Self {
        let (frames, _) = watch::channel(TransitionFrame::default());

        Self {
            inner: Arc::new(ControllerInner {
                frames,
                tasks: Mutex::new(ControllerTasks::default()),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// React to the upstream theme state.
    ///
    /// A `false` signal does nothing. A `true` signal (re)starts the
    /// choreography from splash. Must be called from within a Tokio runtime.
    pub fn on_theme_signal(&self, is_transitioning: bool, theme: Theme) {
        self.inner.on_theme_signal(is_transitioning, theme);
    }

    /// Follow a theme holder until the controller is stopped or dropped.
    ///
    /// The watcher's current state is evaluated immediately, as a freshly
    /// mounted view would. A pulse is acted on once even if observed twice.
    pub fn attach(&self, mut watcher: ThemeWatcher) {
        if self.is_stopped() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut last_pulse = None;
            let mut signal = watcher.current();

            loop {
                let fresh = signal.is_transitioning && last_pulse != Some(signal.pulse);
                if fresh {
                    last_pulse = Some(signal.pulse);
                }

                match weak.upgrade() {
                    Some(inner) => inner.on_theme_signal(fresh, signal.theme),
                    None => return,
                }

                match watcher.changed().await {
                    Some(next) => signal = next,
                    None => return,
                }
            }
        });

        self.inner.lock_tasks().observer.replace(handle);
    }

    /// Tear the controller down.
    ///
    /// Pending steps are cancelled, the overlay is removed, and every later
    /// signal is ignored.
    pub fn stop(&self) {
        if self.inner.stopped.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut tasks = self.inner.lock_tasks();
            tasks.schedule.cancel();
            tasks.observer.cancel();
        }

        self.inner.frames.send_if_modified(|frame| {
            frame.activation += 1;
            let visible = frame.phase.is_active();
            frame.phase = Phase::Idle;
            frame.overlay = None;
            visible
        });

        tracing::debug!("Theme transition controller stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        self.inner.frames.borrow().phase
    }

    pub fn frame(&self) -> TransitionFrame {
        self.inner.frames.borrow().clone()
    }

    /// Subscribe to rendered frames
    pub fn frames(&self) -> watch::Receiver<TransitionFrame> {
        self.inner.frames.subscribe()
    }
}

impl Default for ThemeTransitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ThemeTransitionController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl ControllerInner {
    fn lock_tasks(&self) -> MutexGuard<'_, ControllerTasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_theme_signal(self: &Arc<Self>, is_transitioning: bool, theme: Theme) {
        if !is_transitioning {
            return;
        }

        // stop() raises the flag before taking the lock, so it is read here
        let mut tasks = self.lock_tasks();
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        let overlay = Arc::new(TransitionOverlay::new(theme));
        let mut activation = 0;
        self.frames.send_modify(|frame| {
            frame.activation += 1;
            frame.phase = Phase::Splash;
            frame.overlay = Some(overlay);
            activation = frame.activation;
        });

        tracing::debug!(%theme, activation, "Theme transition started");

        let started = Instant::now();
        let weak: Weak<ControllerInner> = Arc::downgrade(self);
        tasks.schedule.replace(tokio::spawn(async move {
            for step in PHASE_SCHEDULE {
                tokio::time::sleep_until(started + step.at).await;
                match weak.upgrade() {
                    Some(inner) => inner.advance(activation, step.phase),
                    None => return,
                }
            }
        }));
    }

    /// Apply a scheduled step if it still belongs to the live activation
    fn advance(&self, activation: u64, phase: Phase) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        let applied = self.frames.send_if_modified(|frame| {
            if frame.activation != activation {
                return false;
            }
            frame.phase = phase;
            if phase == Phase::Idle {
                frame.overlay = None;
            }
            true
        });

        if applied && phase == Phase::Idle {
            tracing::debug!(activation, "Theme transition finished");
        }
    }
}
