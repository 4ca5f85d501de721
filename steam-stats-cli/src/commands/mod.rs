pub(crate) mod config;
pub(crate) mod pipeline;
pub(crate) mod setup;
pub(crate) mod status;

use steam_stats_db::StoreProvider;

use crate::CliError;

/// Open the store named by `--host`.
pub(crate) fn connect(host: &str) -> Result<StoreProvider, CliError> {
    let store = StoreProvider::connect(host)
        .map_err(|e| CliError::database(format!("Failed to connect to {}: {}", host, e)))?;
    log::debug!("Connected to {} store at {}", store.describe(), host);
    Ok(store)
}
