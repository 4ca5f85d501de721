//! Sweep progress reporting.

use std::fmt;

/// What happened to one record during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    Resolved,
    NotFound,
    Failed,
    Skipped,
}

impl fmt::Display for SweepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => write!(f, "resolved"),
            Self::NotFound => write!(f, "not found"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Trait for receiving sweep progress updates.
pub trait SweepProgress {
    /// Called once before the first record, with the number of records pending.
    fn on_start(&self, message: &str, total: usize);

    /// Called after each record is processed.
    fn on_item(&self, current: usize, total: usize, name: &str, outcome: SweepOutcome);

    /// Called when the sweep is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SweepProgress for SilentProgress {
    fn on_start(&self, _message: &str, _total: usize) {}
    fn on_item(&self, _current: usize, _total: usize, _name: &str, _outcome: SweepOutcome) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
///
/// Per-game outcomes other than success are already logged by the sweep, so
/// only periodic position updates are written here.
pub struct LogProgress;

/// How many games pass between two `LogProgress` position lines.
const LOG_EVERY: usize = 25;

impl SweepProgress for LogProgress {
    fn on_start(&self, message: &str, total: usize) {
        log::info!("{} ({} pending)", message, total);
    }

    fn on_item(&self, current: usize, total: usize, name: &str, _outcome: SweepOutcome) {
        if current.is_multiple_of(LOG_EVERY) || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
