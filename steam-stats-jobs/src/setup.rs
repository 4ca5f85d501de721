//! One-time provisioning of the namespace and its tables.

use steam_stats_db::DocumentStore;

use crate::error::JobError;

/// What `setup` created and what was already there.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub namespace_created: bool,
    pub tables_created: Vec<String>,
    pub tables_existing: Vec<String>,
}

/// Create `namespace` and `tables` unless they already exist.
///
/// Safe to run any number of times.
pub fn setup<S: DocumentStore + ?Sized>(
    store: &S,
    namespace: &str,
    tables: &[&str],
) -> Result<SetupReport, JobError> {
    let mut report = SetupReport::default();

    if !store.list_namespaces()?.iter().any(|n| n == namespace) {
        store.create_namespace(namespace)?;
        log::debug!("Created namespace {}", namespace);
        report.namespace_created = true;
    }

    let existing = store.list_tables(namespace)?;
    for &table in tables {
        if existing.iter().any(|t| t == table) {
            report.tables_existing.push(table.to_string());
        } else {
            store.create_table(namespace, table)?;
            log::debug!("Created table {}.{}", namespace, table);
            report.tables_created.push(table.to_string());
        }
    }

    Ok(report)
}
