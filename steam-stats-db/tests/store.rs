use serde_json::{Value, json};
use steam_stats_core::Document;
use steam_stats_db::*;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

/// Every provider under test, with a `videogames.ownedgames` table ready.
fn providers() -> Vec<StoreProvider> {
    let stores = vec![
        StoreProvider::Sqlite(SqliteStore::open_memory().unwrap()),
        StoreProvider::Memory(MemoryStore::new()),
    ];
    for store in &stores {
        store.create_namespace("videogames").unwrap();
        store.create_table("videogames", "ownedgames").unwrap();
    }
    stores
}

#[test]
fn upsert_merges_instead_of_replacing() {
    for store in providers() {
        store
            .upsert("videogames", "ownedgames", &doc(json!({"id": 5, "playtime": 10})))
            .unwrap();
        store
            .upsert("videogames", "ownedgames", &doc(json!({"id": 5, "giantbomb_id": 99})))
            .unwrap();

        let stored = store.get("videogames", "ownedgames", 5).unwrap().unwrap();
        assert_eq!(stored["playtime"], json!(10), "{}", store.describe());
        assert_eq!(stored["giantbomb_id"], json!(99), "{}", store.describe());
        assert_eq!(store.count("videogames", "ownedgames").unwrap(), 1);
    }
}

#[test]
fn upsert_is_idempotent() {
    for store in providers() {
        let record = doc(json!({"id": 10, "playtime": 32}));
        store.upsert("videogames", "ownedgames", &record).unwrap();
        let first = store.get("videogames", "ownedgames", 10).unwrap();
        store.upsert("videogames", "ownedgames", &record).unwrap();
        let second = store.get("videogames", "ownedgames", 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.count("videogames", "ownedgames").unwrap(), 1);
    }
}

#[test]
fn upsert_requires_id() {
    for store in providers() {
        let err = store
            .upsert("videogames", "ownedgames", &doc(json!({"name": "mario"})))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
    }
}

#[test]
fn upsert_into_unknown_table_fails() {
    for store in providers() {
        let err = store
            .upsert("videogames", "giantbomb", &doc(json!({"id": 1})))
            .unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound { .. }));
    }
}

#[test]
fn rows_without_field_returns_exactly_the_missing_subset() {
    for store in providers() {
        for record in [
            json!({"id": 1, "name": "Portal", "giantbomb_id": 21170}),
            json!({"id": 2, "name": "Half-Life"}),
            json!({"id": 3, "name": "Braid", "giantbomb_id": null}),
            json!({"id": 4, "name": "Limbo", "giantbomb_id": 0}),
        ] {
            store.upsert("videogames", "ownedgames", &doc(record)).unwrap();
        }

        let mut ids: Vec<i64> = store
            .rows_without_field("videogames", "ownedgames", "giantbomb_id")
            .unwrap()
            .iter()
            .map(|d| d["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![2, 3], "{}", store.describe());
    }
}

#[test]
fn rows_without_field_is_empty_when_all_resolved() {
    for store in providers() {
        store
            .upsert("videogames", "ownedgames", &doc(json!({"id": 1, "name": "Portal"})))
            .unwrap();
        let rows = store
            .rows_without_field("videogames", "ownedgames", "name")
            .unwrap();
        assert!(rows.is_empty());
    }
}

#[test]
fn create_is_idempotent_and_listed_once() {
    for store in providers() {
        store.create_namespace("videogames").unwrap();
        store.create_table("videogames", "ownedgames").unwrap();
        store.create_table("videogames", "giantbomb").unwrap();
        store.create_table("videogames", "giantbomb").unwrap();

        assert_eq!(store.list_namespaces().unwrap(), vec!["videogames"]);
        assert_eq!(
            store.list_tables("videogames").unwrap(),
            vec!["giantbomb", "ownedgames"]
        );
    }
}

#[test]
fn create_table_needs_namespace() {
    for store in providers() {
        let err = store.create_table("missing", "ownedgames").unwrap_err();
        assert!(matches!(err, StoreError::NamespaceNotFound(_)));
        assert!(matches!(
            store.list_tables("missing"),
            Err(StoreError::NamespaceNotFound(_))
        ));
    }
}

#[test]
fn tables_are_isolated() {
    for store in providers() {
        store.create_table("videogames", "giantbomb").unwrap();
        store
            .upsert("videogames", "ownedgames", &doc(json!({"id": 7, "playtime": 1})))
            .unwrap();
        assert_eq!(store.get("videogames", "giantbomb", 7).unwrap(), None);
        assert_eq!(store.count("videogames", "giantbomb").unwrap(), 0);
    }
}

#[test]
fn sqlite_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("videogames.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.create_namespace("videogames").unwrap();
        store.create_table("videogames", "ownedgames").unwrap();
        store
            .upsert("videogames", "ownedgames", &doc(json!({"id": 5, "playtime": 10})))
            .unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let stored = store.get("videogames", "ownedgames", 5).unwrap().unwrap();
    assert_eq!(stored["playtime"], json!(10));
}

#[test]
fn connect_memory_host() {
    let store = StoreProvider::connect(MEMORY_HOST).unwrap();
    assert_eq!(store.describe(), "memory");
    assert!(store.list_namespaces().unwrap().is_empty());
}

#[test]
fn connect_path_host_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("stats.db");
    let store = StoreProvider::connect(path.to_str().unwrap()).unwrap();
    assert_eq!(store.describe(), "sqlite");
    assert!(path.exists());
}
