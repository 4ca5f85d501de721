//! Queries and annotations on the stored `ownedgames` table.

use serde::Serialize;
use serde_json::Value;
use steam_stats_core::Document;
use steam_stats_core::names::{GIANTBOMB_ID_FIELD, ID_FIELD, NAME_FIELD, NAMESPACE, OWNED_GAMES_TABLE};
use steam_stats_db::DocumentStore;

use crate::error::{MalformedGame, SteamError};
use crate::types::OwnedGame;

/// Names of the owned games still waiting for a GiantBomb identifier.
///
/// Records without a `name` cannot be searched for and are left out.
pub fn fetch_owned_games<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<String>, SteamError> {
    let rows = store.rows_without_field(NAMESPACE, OWNED_GAMES_TABLE, GIANTBOMB_ID_FIELD)?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get(NAME_FIELD).and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// Every owned game whose `field` is absent or null.
///
/// Each row decodes on its own, so one malformed record comes back as an
/// `Err` entry next to the others instead of failing the whole query.
pub fn owned_games_without<S: DocumentStore + ?Sized>(
    store: &S,
    field: &str,
) -> Result<Vec<Result<OwnedGame, MalformedGame>>, SteamError> {
    Ok(store
        .rows_without_field(NAMESPACE, OWNED_GAMES_TABLE, field)?
        .into_iter()
        .map(decode_owned_game)
        .collect())
}

fn decode_owned_game(row: Document) -> Result<OwnedGame, MalformedGame> {
    let id = row.get(ID_FIELD).and_then(Value::as_i64);
    serde_json::from_value(Value::Object(row)).map_err(|source| MalformedGame { id, source })
}

/// Merge a single field onto a stored owned game.
pub fn annotate_owned_game<S: DocumentStore + ?Sized>(
    store: &S,
    id: i64,
    field: &str,
    value: Value,
) -> Result<(), SteamError> {
    let mut patch = Document::new();
    patch.insert(ID_FIELD.to_string(), Value::from(id));
    patch.insert(field.to_string(), value);
    store.upsert(NAMESPACE, OWNED_GAMES_TABLE, &patch)?;
    Ok(())
}

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document, SteamError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(<serde_json::Error as serde::ser::Error>::custom(
            "record did not serialize to an object",
        )
        .into()),
    }
}
