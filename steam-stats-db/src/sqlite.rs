//! SQLite-backed document store.
//!
//! Every table is a logical collection inside one `documents` table; each
//! document is stored as a JSON object and merged in Rust on upsert.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use steam_stats_core::Document;

use crate::error::StoreError;
use crate::merge::{merge_into, record_id};
use crate::DocumentStore;

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Self::init(conn)
    }

    /// Open an in-memory store with the full schema. Useful for testing.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Self::init(conn)
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        let version = get_schema_version(&conn)?;
        if version == 0 {
            create_schema(&conn)?;
        } else if version > CURRENT_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: CURRENT_VERSION,
                found: version,
            });
        }
        Ok(Self { conn })
    }

    fn namespace_exists(&self, namespace: &str) -> Result<bool, StoreError> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM namespaces WHERE name = ?1)",
            params![namespace],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn require_table(&self, namespace: &str, table: &str) -> Result<(), StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM collections WHERE namespace = ?1 AND name = ?2)",
            params![namespace, table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::TableNotFound {
                namespace: namespace.to_string(),
                table: table.to_string(),
            });
        }
        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO namespaces (name) VALUES (?1)",
            params![name],
        )?;
        Ok(())
    }

    fn create_table(&self, namespace: &str, table: &str) -> Result<(), StoreError> {
        if !self.namespace_exists(namespace)? {
            return Err(StoreError::NamespaceNotFound(namespace.to_string()));
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO collections (namespace, name) VALUES (?1, ?2)",
            params![namespace, table],
        )?;
        Ok(())
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT name FROM namespaces ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn list_tables(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        if !self.namespace_exists(namespace)? {
            return Err(StoreError::NamespaceNotFound(namespace.to_string()));
        }
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM collections WHERE namespace = ?1 ORDER BY name")?;
        let rows = stmt.query_map(params![namespace], |row| row.get::<_, String>(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn upsert(&self, namespace: &str, table: &str, record: &Document) -> Result<(), StoreError> {
        let id = record_id(record)?;
        self.require_table(namespace, table)?;

        let tx = self.conn.unchecked_transaction()?;
        let existing: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE namespace = ?1 AND collection = ?2 AND id = ?3",
                params![namespace, table, id],
                |row| row.get(0),
            )
            .optional()?;

        let mut merged = match existing {
            Some(body) => parse_body(id, &body)?,
            None => Document::new(),
        };
        merge_into(&mut merged, record);

        tx.execute(
            "INSERT INTO documents (namespace, collection, id, body)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, collection, id) DO UPDATE SET
                 body = excluded.body,
                 updated_at = datetime('now')",
            params![namespace, table, id, serde_json::to_string(&merged)?],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn rows_without_field(
        &self,
        namespace: &str,
        table: &str,
        field: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.require_table(namespace, table)?;

        // json_extract yields NULL both for a missing key and for a JSON null.
        let mut stmt = self.conn.prepare(
            "SELECT id, body FROM documents
             WHERE namespace = ?1 AND collection = ?2 AND json_extract(body, ?3) IS NULL
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![namespace, table, json_path(field)], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row?;
            documents.push(parse_body(id, &body)?);
        }
        Ok(documents)
    }

    fn get(&self, namespace: &str, table: &str, id: i64) -> Result<Option<Document>, StoreError> {
        self.require_table(namespace, table)?;
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE namespace = ?1 AND collection = ?2 AND id = ?3",
                params![namespace, table, id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|b| parse_body(id, &b)).transpose()
    }

    fn count(&self, namespace: &str, table: &str) -> Result<usize, StoreError> {
        self.require_table(namespace, table)?;
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE namespace = ?1 AND collection = ?2",
            params![namespace, table],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// Build a JSON path selecting a top-level key, quoting it so field names
/// containing dots are not treated as nested paths.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

fn parse_body(id: i64, body: &str) -> Result<Document, StoreError> {
    match serde_json::from_str(body)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject(id)),
    }
}

/// Create all tables if they don't exist.
///
/// Safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), StoreError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS namespaces (
    name TEXT PRIMARY KEY,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Logical tables inside a namespace
CREATE TABLE IF NOT EXISTS collections (
    namespace TEXT NOT NULL REFERENCES namespaces(name),
    name TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (namespace, name)
);

CREATE TABLE IF NOT EXISTS documents (
    namespace TEXT NOT NULL,
    collection TEXT NOT NULL,
    id INTEGER NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (namespace, collection, id),
    FOREIGN KEY (namespace, collection) REFERENCES collections(namespace, name)
);
"#;
