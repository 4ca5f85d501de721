use steam_stats_core::TransportError;
use steam_stats_db::StoreError;

/// Errors that can occur during catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("GiantBomb request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("No GiantBomb match for \"{query}\"")]
    NoMatch { query: String },

    /// GiantBomb answered, but with a non-OK status code (invalid key, unknown object, ...).
    #[error("GiantBomb API error {status_code}: {message}")]
    Api { status_code: i64, message: String },

    #[error("Unexpected GiantBomb payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}
