use serde::de::DeserializeOwned;
use steam_stats_core::Fetcher;
use steam_stats_core::names::{GIANTBOMB_TABLE, NAMESPACE};
use steam_stats_db::DocumentStore;

use crate::error::CatalogError;
use crate::types::{CatalogMatch, CatalogRecord, Envelope, STATUS_OK, SearchResult};

const BASE_URL: &str = "https://www.giantbomb.com/api";

/// GiantBomb prefixes game ids with this resource type in detail URLs.
const GAME_RESOURCE_PREFIX: &str = "3030";

/// Credentials for the GiantBomb API.
#[derive(Debug, Clone, Default)]
pub struct GiantBombConfig {
    pub api_key: String,
}

/// Client-side view of the GiantBomb catalog.
pub struct GiantBombCatalog {
    config: GiantBombConfig,
}

impl GiantBombCatalog {
    pub fn new(config: GiantBombConfig) -> Self {
        Self { config }
    }

    /// URL searching games by name. Only the first hit is requested.
    pub fn search_url(&self, name: &str) -> String {
        format!(
            "{}/search/?api_key={}&format=json&resources=game&limit=1&field_list=id,name&query={}",
            BASE_URL,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(name),
        )
    }

    /// URL of the full record for a GiantBomb game id.
    pub fn detail_url(&self, id: i64) -> String {
        format!(
            "{}/game/{}-{}/?api_key={}&format=json",
            BASE_URL,
            GAME_RESOURCE_PREFIX,
            id,
            urlencoding::encode(&self.config.api_key),
        )
    }

    /// Search for `name`, taking the first result as the match.
    ///
    /// An empty result list is an unresolved match, not an error.
    pub fn lookup<F: Fetcher>(&self, fetcher: &F, name: &str) -> Result<CatalogMatch, CatalogError> {
        let results: Vec<SearchResult> = self.request(fetcher, &self.search_url(name))?;
        let first = results.into_iter().next();

        match &first {
            Some(hit) => log::debug!(
                "GiantBomb matched \"{}\" to {} ({})",
                name,
                hit.id,
                hit.name.as_deref().unwrap_or("unnamed")
            ),
            None => log::debug!("GiantBomb has no match for \"{}\"", name),
        }

        Ok(CatalogMatch {
            query: name.to_string(),
            id: first.as_ref().map(|hit| hit.id),
            name: first.and_then(|hit| hit.name),
        })
    }

    /// Resolve `name` to a GiantBomb id.
    ///
    /// Fails with [`CatalogError::NoMatch`] when the search finds nothing.
    pub fn search<F: Fetcher>(&self, fetcher: &F, name: &str) -> Result<i64, CatalogError> {
        let found = self.lookup(fetcher, name)?;
        found.id.ok_or(CatalogError::NoMatch { query: found.query })
    }

    /// Fetch the full record of a GiantBomb game.
    pub fn fetch_by_id<F: Fetcher>(&self, fetcher: &F, id: i64) -> Result<CatalogRecord, CatalogError> {
        self.request(fetcher, &self.detail_url(id))
    }

    /// Store a fetched record in the `giantbomb` table.
    pub fn update_catalog_record<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
        record: &CatalogRecord,
    ) -> Result<(), CatalogError> {
        store.upsert(NAMESPACE, GIANTBOMB_TABLE, &record.to_document())?;
        Ok(())
    }

    /// Fetch an endpoint, check the envelope status and decode its `results`.
    fn request<F: Fetcher, T: DeserializeOwned>(&self, fetcher: &F, url: &str) -> Result<T, CatalogError> {
        let envelope: Envelope = fetcher.fetch(url)?;
        if envelope.status_code != STATUS_OK {
            return Err(CatalogError::Api {
                status_code: envelope.status_code,
                message: envelope.error,
            });
        }
        if let Some(total) = envelope.number_of_total_results {
            log::trace!("GiantBomb reported {} total results", total);
        }
        Ok(serde_json::from_value(envelope.results)?)
    }
}
