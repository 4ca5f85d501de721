//! Document store for steam-stats.
//!
//! Stores are organized as namespaces containing tables of JSON documents
//! keyed by an integer `id`. Writes merge into the stored document instead of
//! replacing it, and the "missing field" query is what drives incremental
//! progress through the pipeline.

pub mod error;
pub mod memory;
pub mod merge;
pub mod sqlite;

use std::path::{Path, PathBuf};

use steam_stats_core::Document;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Host value that selects the default on-disk database.
pub const DEFAULT_HOST: &str = "localhost";

/// Host value that selects a throwaway in-memory store.
pub const MEMORY_HOST: &str = ":memory:";

/// Operations every store provider supports.
pub trait DocumentStore {
    /// Create a namespace. Succeeds if it already exists.
    fn create_namespace(&self, name: &str) -> Result<(), StoreError>;

    /// Create a table inside an existing namespace. Succeeds if it already exists.
    fn create_table(&self, namespace: &str, table: &str) -> Result<(), StoreError>;

    fn list_namespaces(&self) -> Result<Vec<String>, StoreError>;

    fn list_tables(&self, namespace: &str) -> Result<Vec<String>, StoreError>;

    /// Insert `record`, or merge it into the stored document with the same `id`.
    ///
    /// Fields absent from `record` keep their stored values.
    fn upsert(&self, namespace: &str, table: &str, record: &Document) -> Result<(), StoreError>;

    /// Every document in `table` whose `field` is absent or null. Order is unspecified.
    fn rows_without_field(
        &self,
        namespace: &str,
        table: &str,
        field: &str,
    ) -> Result<Vec<Document>, StoreError>;

    fn get(&self, namespace: &str, table: &str, id: i64) -> Result<Option<Document>, StoreError>;

    fn count(&self, namespace: &str, table: &str) -> Result<usize, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        (**self).create_namespace(name)
    }

    fn create_table(&self, namespace: &str, table: &str) -> Result<(), StoreError> {
        (**self).create_table(namespace, table)
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_namespaces()
    }

    fn list_tables(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        (**self).list_tables(namespace)
    }

    fn upsert(&self, namespace: &str, table: &str, record: &Document) -> Result<(), StoreError> {
        (**self).upsert(namespace, table, record)
    }

    fn rows_without_field(
        &self,
        namespace: &str,
        table: &str,
        field: &str,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).rows_without_field(namespace, table, field)
    }

    fn get(&self, namespace: &str, table: &str, id: i64) -> Result<Option<Document>, StoreError> {
        (**self).get(namespace, table, id)
    }

    fn count(&self, namespace: &str, table: &str) -> Result<usize, StoreError> {
        (**self).count(namespace, table)
    }
}

/// The store implementations a process can be connected to.
pub enum StoreProvider {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl StoreProvider {
    /// Connect to the store named by `host`.
    ///
    /// `localhost` opens the default database under the user data directory,
    /// `:memory:` opens an empty in-memory store, and anything else is taken
    /// as the path of a SQLite database file.
    pub fn connect(host: &str) -> Result<Self, StoreError> {
        match host {
            MEMORY_HOST => Ok(Self::Memory(MemoryStore::new())),
            DEFAULT_HOST => {
                let path = default_database_path().ok_or_else(|| {
                    StoreError::Location("could not determine data directory".to_string())
                })?;
                Self::open_path(&path)
            }
            other => Self::open_path(Path::new(other)),
        }
    }

    fn open_path(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        log::debug!("Opening database at {}", path.display());
        Ok(Self::Sqlite(SqliteStore::open(path)?))
    }

    /// Human-readable description of where the data lives.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }

    fn inner(&self) -> &dyn DocumentStore {
        match self {
            Self::Sqlite(store) => store,
            Self::Memory(store) => store,
        }
    }
}

impl DocumentStore for StoreProvider {
    fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        self.inner().create_namespace(name)
    }

    fn create_table(&self, namespace: &str, table: &str) -> Result<(), StoreError> {
        self.inner().create_table(namespace, table)
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        self.inner().list_namespaces()
    }

    fn list_tables(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        self.inner().list_tables(namespace)
    }

    fn upsert(&self, namespace: &str, table: &str, record: &Document) -> Result<(), StoreError> {
        self.inner().upsert(namespace, table, record)
    }

    fn rows_without_field(
        &self,
        namespace: &str,
        table: &str,
        field: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner().rows_without_field(namespace, table, field)
    }

    fn get(&self, namespace: &str, table: &str, id: i64) -> Result<Option<Document>, StoreError> {
        self.inner().get(namespace, table, id)
    }

    fn count(&self, namespace: &str, table: &str) -> Result<usize, StoreError> {
        self.inner().count(namespace, table)
    }
}

/// Default database location: `<data_dir>/steam-stats/videogames.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("steam-stats").join("videogames.db"))
}
