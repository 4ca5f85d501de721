use serde_json::Value;
use steam_stats_core::Fetcher;
use steam_stats_core::names::{GIANTBOMB_FETCHED_FIELD, GIANTBOMB_ID_FIELD};
use steam_stats_db::DocumentStore;
use steam_stats_giantbomb::{CatalogError, GiantBombCatalog};
use steam_stats_steam::{OwnedGame, SteamInventory, annotate_owned_game, owned_games_without};

use crate::error::JobError;
use crate::progress::{SweepOutcome, SweepProgress};

/// GiantBomb's status code for an id that does not exist.
const GIANTBOMB_OBJECT_NOT_FOUND: i64 = 101;

/// Statistics from one sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepStats {
    pub processed: usize,
    pub resolved: usize,
    pub not_found: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SweepStats {
    fn record(&mut self, outcome: SweepOutcome) {
        self.processed += 1;
        match outcome {
            SweepOutcome::Resolved => self.resolved += 1,
            SweepOutcome::NotFound => self.not_found += 1,
            SweepOutcome::Failed => self.failed += 1,
            SweepOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed: {} resolved, {} not found, {} failed, {} skipped",
            self.processed, self.resolved, self.not_found, self.failed, self.skipped
        )
    }
}

/// Runs the pipeline workflows against one fetcher and one store.
pub struct Job<F, S> {
    fetcher: F,
    store: S,
}

impl<F: Fetcher, S: DocumentStore> Job<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self { fetcher, store }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Download the Steam library and upsert every owned game.
    ///
    /// The first failure ends the run; games already written stay written.
    /// Returns the number of games stored.
    pub fn owned_games_fetch(&self, steam: &mut SteamInventory) -> Result<usize, JobError> {
        let fetched = steam.get_owned_games(&self.fetcher)?;
        log::info!("Fetched {} owned games from Steam", fetched);
        let written = steam.update_owned_games(&self.store)?;
        Ok(written)
    }

    /// Resolve a GiantBomb id for every owned game that lacks one.
    ///
    /// A game that cannot be matched, whose search fails, or whose stored
    /// record cannot be read is skipped and retried on the next run. Store
    /// failures end the sweep.
    pub fn owned_games_search(
        &self,
        giantbomb: &GiantBombCatalog,
        progress: &dyn SweepProgress,
    ) -> Result<SweepStats, JobError> {
        let pending = owned_games_without(&self.store, GIANTBOMB_ID_FIELD)?;
        let total = pending.len();
        let mut stats = SweepStats::default();
        progress.on_start("Searching GiantBomb for owned games", total);

        for (index, entry) in pending.iter().enumerate() {
            let (label, outcome) = match entry {
                Err(bad) => {
                    log::warn!("Skipping unreadable owned game: {}", bad);
                    (bad.label(), SweepOutcome::Failed)
                }
                Ok(game) => (game.label(), self.search_one(giantbomb, game)?),
            };
            stats.record(outcome);
            progress.on_item(index + 1, total, &label, outcome);
        }

        progress.on_complete(&stats.summary());
        Ok(stats)
    }

    /// Store the GiantBomb record of every owned game that has an id but no
    /// stored record yet, then mark the game as fetched.
    ///
    /// Per-game fetch failures are skipped like in [`owned_games_search`](Self::owned_games_search).
    pub fn owned_games_fetch_by_id(
        &self,
        giantbomb: &GiantBombCatalog,
        progress: &dyn SweepProgress,
    ) -> Result<SweepStats, JobError> {
        // Games without an id wait for `search`; unreadable rows are reported.
        let pending: Vec<_> = owned_games_without(&self.store, GIANTBOMB_FETCHED_FIELD)?
            .into_iter()
            .filter(|entry| entry.as_ref().map_or(true, |game| game.giantbomb_id.is_some()))
            .collect();
        let total = pending.len();
        let mut stats = SweepStats::default();
        progress.on_start("Fetching GiantBomb records", total);

        for (index, entry) in pending.iter().enumerate() {
            let (label, outcome) = match entry {
                Err(bad) => {
                    log::warn!("Skipping unreadable owned game: {}", bad);
                    (bad.label(), SweepOutcome::Failed)
                }
                Ok(game) => (game.label(), self.fetch_one(giantbomb, game)?),
            };
            stats.record(outcome);
            progress.on_item(index + 1, total, &label, outcome);
        }

        progress.on_complete(&stats.summary());
        Ok(stats)
    }

    fn search_one(
        &self,
        giantbomb: &GiantBombCatalog,
        game: &OwnedGame,
    ) -> Result<SweepOutcome, JobError> {
        let Some(name) = game.name.as_deref() else {
            log::info!("Skipping app {}: no name to search for", game.id);
            return Ok(SweepOutcome::Skipped);
        };
        match giantbomb.search(&self.fetcher, name) {
            Ok(giantbomb_id) => {
                annotate_owned_game(
                    &self.store,
                    game.id,
                    GIANTBOMB_ID_FIELD,
                    Value::from(giantbomb_id),
                )?;
                Ok(SweepOutcome::Resolved)
            }
            Err(CatalogError::NoMatch { .. }) => {
                log::info!("No GiantBomb match for \"{}\"", name);
                Ok(SweepOutcome::NotFound)
            }
            Err(e) => {
                log::warn!("Search for \"{}\" failed: {}", name, e);
                Ok(SweepOutcome::Failed)
            }
        }
    }

    fn fetch_one(
        &self,
        giantbomb: &GiantBombCatalog,
        game: &OwnedGame,
    ) -> Result<SweepOutcome, JobError> {
        let Some(giantbomb_id) = game.giantbomb_id else {
            return Ok(SweepOutcome::Skipped);
        };
        match giantbomb.fetch_by_id(&self.fetcher, giantbomb_id) {
            Ok(record) => {
                giantbomb.update_catalog_record(&self.store, &record)?;
                annotate_owned_game(&self.store, game.id, GIANTBOMB_FETCHED_FIELD, Value::Bool(true))?;
                Ok(SweepOutcome::Resolved)
            }
            Err(CatalogError::Api { status_code, .. })
                if status_code == GIANTBOMB_OBJECT_NOT_FOUND =>
            {
                log::warn!("GiantBomb has no game {} ({})", giantbomb_id, game.label());
                Ok(SweepOutcome::NotFound)
            }
            Err(e) => {
                log::warn!("Fetching GiantBomb game {} failed: {}", giantbomb_id, e);
                Ok(SweepOutcome::Failed)
            }
        }
    }
}
