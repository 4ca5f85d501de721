//! How far the stored owned games are through the pipeline.

use steam_stats_core::names::{
    GIANTBOMB_FETCHED_FIELD, GIANTBOMB_ID_FIELD, GIANTBOMB_TABLE, NAMESPACE, OWNED_GAMES_TABLE,
};
use steam_stats_db::DocumentStore;
use steam_stats_steam::{fetch_owned_games, owned_games_without};

use crate::error::JobError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStatus {
    pub owned_games: usize,
    /// Owned games with no GiantBomb id yet.
    pub awaiting_search: usize,
    /// Names among `awaiting_search` that a search can be run for.
    pub searchable_names: Vec<String>,
    /// Owned games with a GiantBomb id but no stored record yet.
    pub awaiting_fetch: usize,
    pub catalog_records: usize,
}

pub fn pipeline_status<S: DocumentStore + ?Sized>(store: &S) -> Result<PipelineStatus, JobError> {
    let awaiting_fetch = owned_games_without(store, GIANTBOMB_FETCHED_FIELD)?
        .iter()
        .filter(|entry| entry.as_ref().is_ok_and(|game| game.giantbomb_id.is_some()))
        .count();

    Ok(PipelineStatus {
        owned_games: store.count(NAMESPACE, OWNED_GAMES_TABLE)?,
        awaiting_search: store
            .rows_without_field(NAMESPACE, OWNED_GAMES_TABLE, GIANTBOMB_ID_FIELD)?
            .len(),
        searchable_names: fetch_owned_games(store)?,
        awaiting_fetch,
        catalog_records: store.count(NAMESPACE, GIANTBOMB_TABLE)?,
    })
}
