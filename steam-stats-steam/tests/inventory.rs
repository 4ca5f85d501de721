use std::cell::RefCell;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use steam_stats_core::fetcher::decode;
use steam_stats_core::names::*;
use steam_stats_core::{Document, Fetcher, TransportError};
use steam_stats_db::{DocumentStore, MemoryStore, StoreError};
use steam_stats_steam::*;

const SAMPLE_RESPONSE: &str = r#"{"response": {"game_count": 1, "games": [{"appid": 10, "playtime_forever": 32}]}}"#;

/// Serves one canned body for every URL.
struct FakeFetcher(&'static str);

impl Fetcher for FakeFetcher {
    fn fetch<T: DeserializeOwned>(&self, _url: &str) -> Result<T, TransportError> {
        decode(self.0)
    }
}

/// Records every upsert; optionally fails once `fail_after` records were accepted.
#[derive(Default)]
struct RecordingStore {
    upserts: RefCell<Vec<Document>>,
    fail_after: Option<usize>,
    rows: Vec<Document>,
}

impl DocumentStore for RecordingStore {
    fn create_namespace(&self, _name: &str) -> Result<(), StoreError> {
        Ok(())
    }
    fn create_table(&self, _namespace: &str, _table: &str) -> Result<(), StoreError> {
        Ok(())
    }
    fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        Ok(vec![])
    }
    fn list_tables(&self, _namespace: &str) -> Result<Vec<String>, StoreError> {
        Ok(vec![])
    }
    fn upsert(&self, _namespace: &str, _table: &str, record: &Document) -> Result<(), StoreError> {
        let mut upserts = self.upserts.borrow_mut();
        if self.fail_after == Some(upserts.len()) {
            return Err(StoreError::Location("connection lost".to_string()));
        }
        upserts.push(record.clone());
        Ok(())
    }
    fn rows_without_field(
        &self,
        _namespace: &str,
        _table: &str,
        _field: &str,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self.rows.clone())
    }
    fn get(&self, _namespace: &str, _table: &str, _id: i64) -> Result<Option<Document>, StoreError> {
        Ok(None)
    }
    fn count(&self, _namespace: &str, _table: &str) -> Result<usize, StoreError> {
        Ok(self.upserts.borrow().len())
    }
}

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

fn inventory() -> SteamInventory {
    SteamInventory::new(SteamConfig {
        api_key: "API_KEY".to_string(),
        steam_id: "ID".to_string(),
    })
}

fn memory_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.create_namespace(NAMESPACE).unwrap();
    for table in TABLES {
        store.create_table(NAMESPACE, table).unwrap();
    }
    store
}

#[test]
fn data_marshalling() {
    let mut steam = inventory();
    let count = steam.get_owned_games(&FakeFetcher(SAMPLE_RESPONSE)).unwrap();
    assert_eq!(count, 1);
    assert_eq!(steam.games()[0].id, 10);
    assert_eq!(steam.games()[0].playtime, 32);
    assert_eq!(steam.games()[0].name, None);
}

#[test]
fn data_updating() {
    let mut steam = inventory();
    steam.get_owned_games(&FakeFetcher(SAMPLE_RESPONSE)).unwrap();

    let store = RecordingStore::default();
    assert_eq!(steam.update_owned_games(&store).unwrap(), 1);

    let upserts = store.upserts.borrow();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0], doc(json!({"id": 10, "playtime": 32})));
}

#[test]
fn names_are_stored_when_steam_sends_them() {
    let mut steam = inventory();
    steam
        .get_owned_games(&FakeFetcher(
            r#"{"response": {"game_count": 1, "games": [{"appid": 400, "name": "Portal", "playtime_forever": 95, "img_icon_url": "abc"}]}}"#,
        ))
        .unwrap();

    let store = RecordingStore::default();
    steam.update_owned_games(&store).unwrap();
    assert_eq!(
        store.upserts.borrow()[0],
        doc(json!({"id": 400, "playtime": 95, "name": "Portal"}))
    );
}

#[test]
fn private_profile_yields_no_games() {
    let mut steam = inventory();
    let count = steam.get_owned_games(&FakeFetcher(r#"{"response": {}}"#)).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn failed_fetch_keeps_previous_games() {
    let mut steam = inventory();
    steam.get_owned_games(&FakeFetcher(SAMPLE_RESPONSE)).unwrap();

    let err = steam
        .get_owned_games(&FakeFetcher("<html>502 Bad Gateway</html>"))
        .unwrap_err();
    assert!(matches!(err, SteamError::Transport(TransportError::Decode { .. })));
    assert_eq!(steam.games().len(), 1);
    assert_eq!(steam.games()[0].id, 10);
}

#[test]
fn update_stops_at_first_failure() {
    let mut steam = inventory();
    steam
        .get_owned_games(&FakeFetcher(
            r#"{"response": {"games": [
                {"appid": 1, "playtime_forever": 1},
                {"appid": 2, "playtime_forever": 2},
                {"appid": 3, "playtime_forever": 3}
            ]}}"#,
        ))
        .unwrap();

    let store = RecordingStore {
        fail_after: Some(1),
        ..RecordingStore::default()
    };
    let err = steam.update_owned_games(&store).unwrap_err();
    assert!(matches!(err, SteamError::Store(_)));

    // The first game stays committed; the third is never attempted.
    let upserts = store.upserts.borrow();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0]["id"], json!(1));
}

#[test]
fn fetching_names() {
    let store = RecordingStore {
        rows: vec![doc(json!({"name": "mario"}))],
        ..RecordingStore::default()
    };
    assert_eq!(fetch_owned_games(&store).unwrap(), vec!["mario"]);
}

#[test]
fn fetching_names_skips_unnamed_and_resolved() {
    let store = memory_store();
    for record in [
        json!({"id": 1, "name": "Portal", "giantbomb_id": 21170}),
        json!({"id": 2, "name": "Braid"}),
        json!({"id": 3, "playtime": 4}),
    ] {
        store.upsert(NAMESPACE, OWNED_GAMES_TABLE, &doc(record)).unwrap();
    }
    assert_eq!(fetch_owned_games(&store).unwrap(), vec!["Braid"]);
}

#[test]
fn owned_games_without_decodes_records() {
    let store = memory_store();
    store
        .upsert(
            NAMESPACE,
            OWNED_GAMES_TABLE,
            &doc(json!({"id": 2, "name": "Braid", "playtime": 12})),
        )
        .unwrap();

    let games: Vec<OwnedGame> = owned_games_without(&store, GIANTBOMB_ID_FIELD)
        .unwrap()
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        games,
        vec![OwnedGame {
            id: 2,
            playtime: Some(12),
            name: Some("Braid".to_string()),
            ..OwnedGame::default()
        }]
    );
}

#[test]
fn malformed_record_does_not_hide_the_rest() {
    let store = memory_store();
    for record in [
        json!({"id": 1, "name": 42}),
        json!({"id": 2, "name": "Portal", "playtime": 95}),
    ] {
        store.upsert(NAMESPACE, OWNED_GAMES_TABLE, &doc(record)).unwrap();
    }

    let games = owned_games_without(&store, GIANTBOMB_ID_FIELD).unwrap();
    assert_eq!(games.len(), 2);

    let bad = games[0].as_ref().unwrap_err();
    assert_eq!(bad.id, Some(1));
    assert_eq!(bad.label(), "app 1");

    let good = games[1].as_ref().unwrap();
    assert_eq!(good.id, 2);
    assert_eq!(good.name.as_deref(), Some("Portal"));
}

#[test]
fn annotate_merges_onto_existing_record() {
    let store = memory_store();
    store
        .upsert(NAMESPACE, OWNED_GAMES_TABLE, &doc(json!({"id": 5, "playtime": 10})))
        .unwrap();
    annotate_owned_game(&store, 5, GIANTBOMB_ID_FIELD, json!(99)).unwrap();

    let stored = store.get(NAMESPACE, OWNED_GAMES_TABLE, 5).unwrap().unwrap();
    assert_eq!(stored, doc(json!({"id": 5, "playtime": 10, "giantbomb_id": 99})));
}

#[test]
fn refetch_preserves_annotations() {
    let store = memory_store();
    let mut steam = inventory();
    steam.get_owned_games(&FakeFetcher(SAMPLE_RESPONSE)).unwrap();
    steam.update_owned_games(&store).unwrap();
    annotate_owned_game(&store, 10, GIANTBOMB_ID_FIELD, json!(99)).unwrap();

    steam.update_owned_games(&store).unwrap();
    let stored = store.get(NAMESPACE, OWNED_GAMES_TABLE, 10).unwrap().unwrap();
    assert_eq!(stored["playtime"], json!(32));
    assert_eq!(stored["giantbomb_id"], json!(99));
}
