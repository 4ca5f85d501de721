//! Names of the persisted layout.
//!
//! The presence of a field on an owned game is what records how far through
//! the pipeline it has progressed, so these constants double as state names.

/// The single namespace holding every table.
pub const NAMESPACE: &str = "videogames";

/// Owned games keyed by Steam appid.
pub const OWNED_GAMES_TABLE: &str = "ownedgames";

/// GiantBomb game records keyed by GiantBomb id.
pub const GIANTBOMB_TABLE: &str = "giantbomb";

/// Every table `setup` provisions.
pub const TABLES: [&str; 2] = [OWNED_GAMES_TABLE, GIANTBOMB_TABLE];

pub const ID_FIELD: &str = "id";
pub const NAME_FIELD: &str = "name";
pub const PLAYTIME_FIELD: &str = "playtime";

/// Set on an owned game once a GiantBomb search has matched it.
pub const GIANTBOMB_ID_FIELD: &str = "giantbomb_id";

/// Set on an owned game once its GiantBomb record has been stored.
pub const GIANTBOMB_FETCHED_FIELD: &str = "giantbomb_fetched";
