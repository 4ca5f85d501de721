use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Stored document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),
    #[error("Table not found: {namespace}.{table}")]
    TableNotFound { namespace: String, table: String },
    #[error("Record has no integer 'id' field")]
    MissingId,
    #[error("Stored document is not a JSON object (id {0})")]
    NotAnObject(i64),
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Cannot resolve database location: {0}")]
    Location(String),
}
