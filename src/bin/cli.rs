//! Vantage CLI
//!
//! Developer harness for the dashboard client core:
//! - Follow an analysis run's activity log
//! - Replay the theme transition schedule
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use vantage::{
    init_logging, ActivityEntry, ActivityFeedPoller, AutoScroll, Config, HttpActivitySource, Phase,
    SubjectId, Theme, ThemeHolder, ThemeTransitionController, TransitionFrame, TRANSITION_DURATION,
};

#[derive(Parser)]
#[command(name = "vantage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analysis dashboard client core")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Follow the activity log of an analysis run
    Watch {
        /// Analysis run id
        subject: String,
        /// Fetch once and exit instead of polling
        #[arg(long)]
        once: bool,
        /// Poll interval in milliseconds (default: from config)
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Replay theme transitions and print each frame
    Transition {
        /// Theme to start from (light, dark)
        #[arg(short, long, default_value = "dark")]
        theme: Theme,
        /// Number of toggles
        #[arg(short = 'n', long, default_value = "1")]
        toggles: u32,
        /// Delay between toggles in milliseconds; shorter than the
        /// transition restarts it mid-flight
        #[arg(short, long)]
        gap_ms: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging)?;

    match cli.command {
        Commands::Watch {
            subject,
            once,
            interval_ms,
        } => {
            if let Some(ms) = interval_ms {
                config.feed.poll_interval_ms = ms;
            }
            watch(&config, subject, once).await
        }

        Commands::Transition {
            theme,
            toggles,
            gap_ms,
        } => {
            let gap = gap_ms
                .map(Duration::from_millis)
                .unwrap_or(TRANSITION_DURATION + Duration::from_millis(300));
            transition(theme, toggles.max(1), gap).await
        }

        Commands::Config { output } => {
            let content = vantage::config::generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", content);
            }
            Ok(())
        }
    }
}

async fn watch(config: &Config, subject: String, once: bool) -> anyhow::Result<()> {
    let subject = SubjectId::from(subject);
    if subject.is_empty() {
        anyhow::bail!("analysis run id must not be empty");
    }

    let source = HttpActivitySource::new(&config.api).context("building HTTP client")?;
    tracing::info!(
        url = %source.activity_url(&subject),
        once,
        "Watching activity"
    );

    let poller = ActivityFeedPoller::new(Arc::new(source)).with_interval(config.feed.poll_interval());
    let subscription = poller.start(subject, !once);
    let mut view = subscription.view();
    let mut scroll = AutoScroll::new();
    let mut printer = FeedPrinter::default();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut snapshot = view.borrow_and_update().clone();
    loop {
        if scroll.observe(&snapshot) {
            for line in printer.render(&snapshot.entries) {
                println!("{}", line);
            }
        }

        if snapshot.consecutive_failures > 0 {
            eprintln!(
                "fetch failed ({} in a row), showing last good list",
                snapshot.consecutive_failures
            );
            if once {
                anyhow::bail!("activity fetch failed");
            }
        }

        if once && snapshot.last_updated.is_some() {
            if snapshot.entries.is_empty() {
                println!("No activity yet.");
            }
            break;
        }

        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                snapshot = view.borrow_and_update().clone();
            }
            _ = &mut shutdown => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    Ok(())
}

const SEPARATOR_WIDTH: usize = 40;

/// Turns successive snapshots into terminal lines.
///
/// A snapshot that extends the last printed list only prints the new tail.
/// Any other change prints a separator and the whole snapshot again.
#[derive(Default)]
struct FeedPrinter {
    shown: Arc<Vec<ActivityEntry>>,
}

impl FeedPrinter {
    fn render(&mut self, entries: &Arc<Vec<ActivityEntry>>) -> Vec<String> {
        if Arc::ptr_eq(&self.shown, entries) || self.shown == *entries {
            return Vec::new();
        }

        let shown = self.shown.len();
        let appended = entries.len() > shown && entries[..shown] == self.shown[..];

        let mut lines = Vec::new();
        let from = if appended {
            shown
        } else {
            if shown > 0 {
                lines.push("-".repeat(SEPARATOR_WIDTH));
            }
            0
        };
        lines.extend(entries[from..].iter().map(entry_line));

        self.shown = Arc::clone(entries);
        lines
    }
}

fn entry_line(entry: &ActivityEntry) -> String {
    let style = entry.style();
    let mut line = format!("{} {} {}", style.icon, entry.clock_label(), entry.message);
    if let Some(phase) = &entry.phase {
        line.push_str(&format!(" [{}]", phase));
    }
    line
}

async fn transition(theme: Theme, toggles: u32, gap: Duration) -> anyhow::Result<()> {
    let holder = ThemeHolder::new(theme);
    let controller = ThemeTransitionController::new();
    controller.attach(holder.subscribe());

    let mut frames = controller.frames();
    let started = Instant::now();

    for round in 1..=toggles {
        holder.toggle_theme();
        println!(
            "[{:>5}ms] toggle #{} -> {}",
            started.elapsed().as_millis(),
            round,
            holder.theme()
        );

        let last = round == toggles;
        let deadline = tokio::time::sleep(gap);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                changed = frames.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let frame = frames.borrow_and_update().clone();
                    print_frame(started, &frame);
                    if last && frame.phase == Phase::Idle {
                        return Ok(());
                    }
                }
                _ = &mut deadline, if !last => break,
            }
        }
    }

    Ok(())
}

fn print_frame(started: Instant, frame: &TransitionFrame) {
    let detail = match &frame.overlay {
        Some(overlay) => format!(
            "{} -> {}, {} streaks",
            overlay.previous_theme,
            overlay.theme,
            overlay.streaks.len()
        ),
        None => "overlay removed".to_string(),
    };

    println!(
        "[{:>5}ms] #{} {:?} ({})",
        started.elapsed().as_millis(),
        frame.activation,
        frame.phase,
        detail
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage::ActivityKind;

    fn log(messages: &[&str]) -> Arc<Vec<ActivityEntry>> {
        Arc::new(
            messages
                .iter()
                .map(|m| ActivityEntry::new("2024-05-01T10:00:00Z", ActivityKind::Info, *m))
                .collect(),
        )
    }

    fn messages(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.rsplit(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_grown_snapshot_appends_tail() {
        let mut printer = FeedPrinter::default();

        assert_eq!(messages(&printer.render(&log(&["a1", "a2"]))), vec!["a1", "a2"]);
        assert_eq!(messages(&printer.render(&log(&["a1", "a2", "a3"]))), vec!["a3"]);
    }

    #[test]
    fn test_replaced_snapshot_is_reprinted() {
        let mut printer = FeedPrinter::default();
        printer.render(&log(&["a1", "a2", "a3"]));

        let lines = printer.render(&log(&["b1", "b2", "b3"]));
        assert_eq!(lines[0], "-".repeat(SEPARATOR_WIDTH));
        assert_eq!(messages(&lines[1..]), vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn test_changed_prefix_is_reprinted() {
        let mut printer = FeedPrinter::default();
        printer.render(&log(&["a1", "a2"]));

        let lines = printer.render(&log(&["x1", "a2", "a3"]));
        assert_eq!(lines[0], "-".repeat(SEPARATOR_WIDTH));
        assert_eq!(messages(&lines[1..]), vec!["x1", "a2", "a3"]);
    }

    #[test]
    fn test_shrunk_and_cleared_snapshots() {
        let mut printer = FeedPrinter::default();
        printer.render(&log(&["a1", "a2"]));

        let lines = printer.render(&log(&["a1"]));
        assert_eq!(lines.len(), 2);
        assert_eq!(messages(&lines[1..]), vec!["a1"]);

        assert_eq!(printer.render(&log(&[])), vec!["-".repeat(SEPARATOR_WIDTH)]);
        assert_eq!(messages(&printer.render(&log(&["c1"]))), vec!["c1"]);
    }

    #[test]
    fn test_unchanged_snapshot_prints_nothing() {
        let mut printer = FeedPrinter::default();
        let entries = log(&["a1"]);
        printer.render(&entries);

        assert!(printer.render(&entries).is_empty());
        assert!(printer.render(&log(&["a1"])).is_empty());
    }

    #[test]
    fn test_phase_suffix() {
        let mut entry = ActivityEntry::new("2024-05-01T10:15:30Z", ActivityKind::Milestone, "Draft");
        entry.phase = Some("writing".to_string());

        assert!(entry_line(&entry).ends_with("10:15:30 Draft [writing]"));
    }
}
