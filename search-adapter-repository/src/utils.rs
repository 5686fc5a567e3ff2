//! Utility functions for turning host items into remote records.

use search_adapter_shared::IndexItem;
use serde_json::Value;
use tracing::debug;

use crate::errors::SearchIndexError;
use crate::types::{Record, OBJECT_ID};

/// Flatten an item into a remote record.
///
/// The record holds `objectID` set to the item id plus one attribute per field,
/// holding the field's values unchanged. Fields sharing a name overwrite each
/// other in item order. A field named `objectID` is skipped so the identifier
/// always matches the item id.
///
/// # Returns
///
/// * `Ok(Record)` - The flattened record
/// * `Err(SearchIndexError::ValidationError)` - If the item id is empty
///
/// # Example
///
/// ```
/// use search_adapter_repository::flatten_item;
/// use search_adapter_shared::IndexItem;
///
/// let item = IndexItem::new("x").with_field("b", "s");
/// let record = flatten_item(&item).expect("item has an id");
/// assert_eq!(record["objectID"], "x");
/// assert_eq!(record["b"], "s");
/// ```
pub fn flatten_item(item: &IndexItem) -> Result<Record, SearchIndexError> {
    if item.id.trim().is_empty() {
        return Err(SearchIndexError::validation("item id is required"));
    }

    let mut record = Record::new();
    record.insert(OBJECT_ID.to_string(), Value::String(item.id.clone()));

    for field in &item.fields {
        if field.name == OBJECT_ID {
            debug!(item_id = %item.id, "Skipping field shadowing objectID");
            continue;
        }
        let value = serde_json::to_value(&field.values)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        record.insert(field.name.clone(), value);
    }

    Ok(record)
}

/// Serialized size of a record in bytes, as it would be sent on the wire.
pub fn record_size(record: &Record) -> Result<usize, SearchIndexError> {
    serde_json::to_vec(record)
        .map(|bytes| bytes.len())
        .map_err(|e| SearchIndexError::serialization(e.to_string()))
}
