//! Shared building blocks for steam-stats.
//!
//! Holds the JSON-over-HTTP transport used by both resolvers, the document
//! type every store speaks, and the names of the namespace, tables and fields
//! that make up the persisted layout.

pub mod error;
pub mod fetcher;
pub mod names;

pub use error::TransportError;
pub use fetcher::{Fetcher, JsonFetcher, redact_url};

/// A schemaless record as stored in a table: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;
