use steam_stats_core::Fetcher;
use steam_stats_core::names::{NAMESPACE, OWNED_GAMES_TABLE};
use steam_stats_db::DocumentStore;

use crate::error::SteamError;
use crate::library::to_document;
use crate::types::{OwnedGame, OwnedGamesResponse, SteamGame};

const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";

/// Credentials for the Steam Web API.
#[derive(Debug, Clone, Default)]
pub struct SteamConfig {
    pub api_key: String,
    /// 64-bit Steam id of the account whose library is synced.
    pub steam_id: String,
}

/// The owned-games list of one Steam account.
pub struct SteamInventory {
    config: SteamConfig,
    games: Vec<SteamGame>,
}

impl SteamInventory {
    pub fn new(config: SteamConfig) -> Self {
        Self {
            config,
            games: Vec::new(),
        }
    }

    /// Games from the last successful [`get_owned_games`](Self::get_owned_games).
    pub fn games(&self) -> &[SteamGame] {
        &self.games
    }

    /// URL of the owned-games endpoint for the configured account.
    ///
    /// `include_appinfo` makes Steam return each game's name, which the
    /// GiantBomb search needs later on.
    pub fn generate_url(&self) -> String {
        format!(
            "{}?key={}&steamid={}&format=json&include_appinfo=1",
            OWNED_GAMES_URL,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&self.config.steam_id),
        )
    }

    /// Download the owned-games list, replacing the one held in memory.
    ///
    /// On failure the previous list is kept untouched. Returns the number of games.
    pub fn get_owned_games<F: Fetcher>(&mut self, fetcher: &F) -> Result<usize, SteamError> {
        let owned: OwnedGamesResponse = fetcher.fetch(&self.generate_url())?;

        if owned.response.games.is_empty() {
            log::warn!("Steam returned no games; the profile may be private");
        } else if owned.response.game_count as usize != owned.response.games.len() {
            log::debug!(
                "Steam reported {} games but listed {}",
                owned.response.game_count,
                owned.response.games.len()
            );
        }

        self.games = owned.response.games;
        Ok(self.games.len())
    }

    /// Upsert every held game into `ownedgames` as `{id, playtime[, name]}`.
    ///
    /// Stops at the first failed upsert and returns its error; games written
    /// before it stay written. Returns the number of games written.
    pub fn update_owned_games<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<usize, SteamError> {
        for (written, game) in self.games.iter().enumerate() {
            let record = to_document(&OwnedGame::from(game))?;
            if let Err(e) = store.upsert(NAMESPACE, OWNED_GAMES_TABLE, &record) {
                log::error!(
                    "Failed to store app {} after writing {} of {} games",
                    game.id,
                    written,
                    self.games.len()
                );
                return Err(e.into());
            }
            log::debug!("Stored app {} ({} minutes)", game.id, game.playtime);
        }
        Ok(self.games.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> SteamInventory {
        SteamInventory::new(SteamConfig {
            api_key: "0123456789ABCDEF0123456789ABCDEF".to_string(),
            steam_id: "76561197960287930".to_string(),
        })
    }

    #[test]
    fn url_includes_api_key() {
        assert!(inventory()
            .generate_url()
            .contains("key=0123456789ABCDEF0123456789ABCDEF"));
    }

    #[test]
    fn url_includes_steam_id() {
        assert!(inventory().generate_url().contains("steamid=76561197960287930"));
    }

    #[test]
    fn url_targets_owned_games_endpoint() {
        let url = inventory().generate_url();
        assert!(url.starts_with(OWNED_GAMES_URL));
        assert!(url.contains("format=json"));
        assert!(url.contains("include_appinfo=1"));
    }

    #[test]
    fn url_escapes_reserved_characters() {
        let inv = SteamInventory::new(SteamConfig {
            api_key: "a&b".to_string(),
            steam_id: "1".to_string(),
        });
        assert!(inv.generate_url().contains("key=a%26b&"));
    }

    #[test]
    fn new_inventory_is_empty() {
        assert!(inventory().games().is_empty());
    }
}
