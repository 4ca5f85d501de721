use serde::{Deserialize, Serialize};
use serde_json::Value;
use steam_stats_core::Document;
use steam_stats_core::names::{ID_FIELD, NAME_FIELD};

/// GiantBomb's `status_code` for a successful request.
pub const STATUS_OK: i64 = 1;

/// Envelope wrapping every GiantBomb API response.
///
/// `results` is an array for searches and an object for detail requests,
/// and an empty array when the request failed, so it is decoded late.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub number_of_total_results: Option<u64>,
    #[serde(default)]
    pub results: Value,
}

/// One hit from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome of searching GiantBomb for a name.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub query: String,
    pub id: Option<i64>,
    /// Name of the matched GiantBomb game, when GiantBomb reported one.
    pub name: Option<String>,
}

impl CatalogMatch {
    pub fn resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// A GiantBomb game record as stored in the `giantbomb` table.
///
/// Everything beyond `id` and `name` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Document,
}

impl CatalogRecord {
    /// The record as a store document. An absent name is left out so a
    /// stored one is kept.
    pub fn to_document(&self) -> Document {
        let mut doc = self.fields.clone();
        doc.insert(ID_FIELD.to_string(), Value::from(self.id));
        if let Some(name) = &self.name {
            doc.insert(NAME_FIELD.to_string(), Value::from(name.clone()));
        }
        doc
    }
}
