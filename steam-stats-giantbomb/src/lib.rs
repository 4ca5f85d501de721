//! GiantBomb catalog lookups.
//!
//! Resolves a free-text game name to a GiantBomb id and fetches the full
//! game record for an id.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{GiantBombCatalog, GiantBombConfig};
pub use error::CatalogError;
pub use types::{CatalogMatch, CatalogRecord, SearchResult};
