//! In-memory document store with the same semantics as [`SqliteStore`].
//!
//! Single-threaded: state lives behind a `RefCell`.
//!
//! [`SqliteStore`]: crate::SqliteStore

use std::cell::RefCell;
use std::collections::BTreeMap;

use steam_stats_core::Document;

use crate::error::StoreError;
use crate::merge::{lacks_field, merge_into, record_id};
use crate::DocumentStore;

type Table = BTreeMap<i64, Document>;

#[derive(Default)]
pub struct MemoryStore {
    namespaces: RefCell<BTreeMap<String, BTreeMap<String, Table>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<R>(
        &self,
        namespace: &str,
        table: &str,
        f: impl FnOnce(&mut Table) -> R,
    ) -> Result<R, StoreError> {
        let mut namespaces = self.namespaces.borrow_mut();
        let rows = namespaces
            .get_mut(namespace)
            .and_then(|tables| tables.get_mut(table))
            .ok_or_else(|| StoreError::TableNotFound {
                namespace: namespace.to_string(),
                table: table.to_string(),
            })?;
        Ok(f(rows))
    }
}

impl DocumentStore for MemoryStore {
    fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        self.namespaces
            .borrow_mut()
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    fn create_table(&self, namespace: &str, table: &str) -> Result<(), StoreError> {
        let mut namespaces = self.namespaces.borrow_mut();
        let tables = namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_string()))?;
        tables.entry(table.to_string()).or_default();
        Ok(())
    }

    fn list_namespaces(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.namespaces.borrow().keys().cloned().collect())
    }

    fn list_tables(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        self.namespaces
            .borrow()
            .get(namespace)
            .map(|tables| tables.keys().cloned().collect())
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_string()))
    }

    fn upsert(&self, namespace: &str, table: &str, record: &Document) -> Result<(), StoreError> {
        let id = record_id(record)?;
        self.with_table(namespace, table, |rows| {
            merge_into(rows.entry(id).or_default(), record);
        })
    }

    fn rows_without_field(
        &self,
        namespace: &str,
        table: &str,
        field: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.with_table(namespace, table, |rows| {
            rows.values()
                .filter(|doc| lacks_field(doc, field))
                .cloned()
                .collect()
        })
    }

    fn get(&self, namespace: &str, table: &str, id: i64) -> Result<Option<Document>, StoreError> {
        self.with_table(namespace, table, |rows| rows.get(&id).cloned())
    }

    fn count(&self, namespace: &str, table: &str) -> Result<usize, StoreError> {
        self.with_table(namespace, table, |rows| rows.len())
    }
}
