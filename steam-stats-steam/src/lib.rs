//! Steam owned-games inventory.
//!
//! Fetches the games a Steam account owns along with their playtime and keeps
//! the `ownedgames` table in step with it.

pub mod error;
pub mod inventory;
pub mod library;
pub mod types;

pub use error::{MalformedGame, SteamError};
pub use inventory::{SteamConfig, SteamInventory};
pub use library::{annotate_owned_game, fetch_owned_games, owned_games_without};
pub use types::{OwnedGame, OwnedGamesData, OwnedGamesResponse, SteamGame};
