//! Terminal progress bar for GiantBomb sweeps.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use steam_stats_jobs::{LogProgress, SweepOutcome, SweepProgress};

/// Draws a bar while a sweep runs. Games that are not resolved are reported
/// by the sweep's own log lines.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Pick the reporter for the current terminal: a bar when stderr is a
    /// terminal, plain log lines otherwise.
    pub(crate) fn for_terminal(quiet: bool) -> Box<dyn SweepProgress> {
        if quiet || std::io::stderr().is_terminal() {
            Box::new(Self::new(quiet))
        } else {
            Box::new(LogProgress)
        }
    }

    /// When `quiet` is true the bar is never drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::hidden();
        if !quiet {
            bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        if let Ok(style) =
            ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {wide_msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl SweepProgress for BarProgress {
    fn on_start(&self, message: &str, total: usize) {
        log::info!(
            "{} ({} pending)",
            message.if_supports_color(Stdout, |t| t.bold()),
            total,
        );
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_item(&self, current: usize, _total: usize, name: &str, _outcome: SweepOutcome) {
        self.bar.set_position(current as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::info!(
            "{} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            message,
        );
    }
}
