use steam_stats_db::sqlite::{CURRENT_VERSION, create_schema};
use steam_stats_db::{SqliteStore, StoreError};

#[test]
fn create_schema_in_memory() {
    let store = SqliteStore::open_memory().unwrap();
    let version: i32 = store
        .connection()
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let store = SqliteStore::open_memory().unwrap();
    create_schema(store.connection()).unwrap();
    let rows: i32 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn all_tables_exist() {
    let store = SqliteStore::open_memory().unwrap();
    for table in ["schema_version", "namespaces", "collections", "documents"] {
        let exists: bool = store
            .connection()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {} should exist", table);
    }
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        store
            .connection()
            .execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [CURRENT_VERSION + 1],
            )
            .unwrap();
    }
    assert!(matches!(
        SqliteStore::open(&path),
        Err(StoreError::VersionMismatch { .. })
    ));
}
