use steam_stats_core::TransportError;
use steam_stats_db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("Steam request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed owned game record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored owned game that does not decode into [`OwnedGame`](crate::OwnedGame).
#[derive(Debug, thiserror::Error)]
#[error("Malformed owned game record {}: {source}", describe_id(.id))]
pub struct MalformedGame {
    /// The record's `id`, when it holds an integer.
    pub id: Option<i64>,
    #[source]
    pub source: serde_json::Error,
}

impl MalformedGame {
    /// Name to show in progress output.
    pub fn label(&self) -> String {
        describe_id(&self.id)
    }
}

fn describe_id(id: &Option<i64>) -> String {
    match id {
        Some(id) => format!("app {}", id),
        None => "without id".to_string(),
    }
}
