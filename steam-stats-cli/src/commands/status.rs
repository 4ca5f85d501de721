use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use steam_stats_db::DocumentStore;

use crate::CliError;

pub(crate) fn run_status(store: &dyn DocumentStore, host: &str) -> Result<(), CliError> {
    let status = steam_stats_jobs::pipeline_status(store)?;

    log::info!(
        "{}",
        "Pipeline Status".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", host);
    log::info!("");
    log::info!("  Owned games:       {:>8}", status.owned_games);
    log::info!(
        "  Awaiting search:   {:>8} ({} with a name)",
        status.awaiting_search,
        status.searchable_names.len(),
    );
    for name in &status.searchable_names {
        log::debug!("    {}", name);
    }
    log::info!("  Awaiting fetch:    {:>8}", status.awaiting_fetch);
    log::info!("  GiantBomb records: {:>8}", status.catalog_records);

    if status.owned_games == 0 {
        log::info!("");
        log::info!("Run 'steam-stats steam' to import your library.");
    }

    Ok(())
}
