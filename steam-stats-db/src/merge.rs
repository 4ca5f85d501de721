//! Merge-on-conflict semantics shared by every store provider.

use serde_json::Value;
use steam_stats_core::Document;
use steam_stats_core::names::ID_FIELD;

use crate::error::StoreError;

/// Extract the integer primary key from a record.
pub fn record_id(record: &Document) -> Result<i64, StoreError> {
    record
        .get(ID_FIELD)
        .and_then(Value::as_i64)
        .ok_or(StoreError::MissingId)
}

/// Merge `patch` into `target`.
///
/// Fields in `patch` overwrite fields in `target`; nested objects are merged
/// recursively. Fields missing from `patch` are left alone, and `null` values
/// in `patch` never erase a stored value.
pub fn merge_into(target: &mut Document, patch: &Document) {
    for (key, value) in patch {
        if value.is_null() {
            continue;
        }
        if let Some(slot) = target.get_mut(key) {
            match (slot, value) {
                (Value::Object(existing), Value::Object(incoming)) => {
                    merge_into(existing, incoming)
                }
                (slot, value) => *slot = value.clone(),
            }
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// True when `record` lacks `field` or holds `null` for it.
pub fn lacks_field(record: &Document, field: &str) -> bool {
    record.get(field).is_none_or(Value::is_null)
}
