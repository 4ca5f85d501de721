//! The three pipeline steps: `steam`, `search` and `fetch`.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use steam_stats_core::JsonFetcher;
use steam_stats_db::DocumentStore;
use steam_stats_giantbomb::GiantBombCatalog;
use steam_stats_jobs::Job;
use steam_stats_steam::SteamInventory;

use crate::CliError;
use crate::config::AppConfig;
use crate::progress::BarProgress;

fn job<'s>(
    config: &AppConfig,
    store: &'s dyn DocumentStore,
) -> Result<Job<JsonFetcher, &'s dyn DocumentStore>, CliError> {
    let fetcher = JsonFetcher::new(&config.user_agent)?;
    Ok(Job::new(fetcher, store))
}

/// Download the Steam library and store every owned game.
pub(crate) fn run_steam(config: &AppConfig, store: &dyn DocumentStore) -> Result<(), CliError> {
    let mut steam = SteamInventory::new(config.steam_config()?);
    let written = job(config, store)?.owned_games_fetch(&mut steam)?;
    log::info!(
        "{} Stored {} owned games",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written,
    );
    Ok(())
}

/// Resolve GiantBomb ids for owned games that have none.
pub(crate) fn run_search(
    config: &AppConfig,
    store: &dyn DocumentStore,
    quiet: bool,
) -> Result<(), CliError> {
    let giantbomb = GiantBombCatalog::new(config.giantbomb_config()?);
    let progress = BarProgress::for_terminal(quiet);
    let stats = job(config, store)?.owned_games_search(&giantbomb, progress.as_ref())?;
    if stats.failed > 0 {
        log::warn!(
            "{} searches failed; run 'steam-stats search' again to retry them",
            stats.failed,
        );
    }
    Ok(())
}

/// Store the GiantBomb record of every game with a resolved id.
pub(crate) fn run_fetch(
    config: &AppConfig,
    store: &dyn DocumentStore,
    quiet: bool,
) -> Result<(), CliError> {
    let giantbomb = GiantBombCatalog::new(config.giantbomb_config()?);
    let progress = BarProgress::for_terminal(quiet);
    let stats = job(config, store)?.owned_games_fetch_by_id(&giantbomb, progress.as_ref())?;
    if stats.failed > 0 {
        log::warn!(
            "{} fetches failed; run 'steam-stats fetch' again to retry them",
            stats.failed,
        );
    }
    Ok(())
}
