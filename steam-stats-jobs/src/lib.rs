//! The reconciliation pipeline.
//!
//! Each workflow advances owned games by one step:
//! `steam` stores playtime, `search` resolves a GiantBomb id, and `fetch`
//! stores the GiantBomb record. Which step a game is at is read from the
//! fields present on its stored record, so an interrupted run is resumed by
//! running the same command again.

pub mod error;
pub mod job;
pub mod progress;
pub mod setup;
pub mod status;

pub use error::JobError;
pub use job::{Job, SweepStats};
pub use progress::{LogProgress, SilentProgress, SweepOutcome, SweepProgress};
pub use setup::{SetupReport, setup};
pub use status::{PipelineStatus, pipeline_status};
