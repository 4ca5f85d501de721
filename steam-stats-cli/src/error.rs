use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A pipeline step failed
    #[error("{0}")]
    Job(#[from] steam_stats_jobs::JobError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Transport(#[from] steam_stats_core::TransportError),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
