use serde::{Deserialize, Serialize};

/// Top-level response wrapper from IPlayerService/GetOwnedGames.
#[derive(Debug, Deserialize)]
pub struct OwnedGamesResponse {
    #[serde(default)]
    pub response: OwnedGamesData,
}

/// Steam answers `{"response": {}}` for private profiles, so every field defaults.
#[derive(Debug, Default, Deserialize)]
pub struct OwnedGamesData {
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    pub games: Vec<SteamGame>,
}

/// One owned game as Steam reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SteamGame {
    #[serde(rename = "appid")]
    pub id: i64,
    /// Total minutes played.
    #[serde(rename = "playtime_forever", default)]
    pub playtime: i64,
    /// Only present when the request asked for app info.
    #[serde(default)]
    pub name: Option<String>,
}

/// A row of the `ownedgames` table.
///
/// Only `id` is guaranteed; the other fields appear as the game moves through
/// the pipeline, and absent ones are never written so upserts cannot clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giantbomb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giantbomb_fetched: Option<bool>,
}

impl From<&SteamGame> for OwnedGame {
    fn from(game: &SteamGame) -> Self {
        Self {
            id: game.id,
            playtime: Some(game.playtime),
            name: game.name.clone(),
            ..Self::default()
        }
    }
}

impl OwnedGame {
    /// Name to show in progress output, falling back to the appid.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("app {}", self.id),
        }
    }
}
