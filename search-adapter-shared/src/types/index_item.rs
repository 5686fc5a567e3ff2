//! Item types handed to the adapter for indexing.
//!
//! An item is what the host pipeline wants searchable: a unique id and an
//! ordered list of named fields, each carrying one or many scalar values.

use serde::{Deserialize, Serialize};

/// A scalar field value, or a list of them.
///
/// Values are serialized untagged so that they reach the remote service in
/// their natural JSON shape (`"s"`, `1`, `[1, 2]`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A single named field of an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemField {
    /// The field name, used verbatim as the record attribute name.
    pub name: String,
    /// The field's value(s).
    pub values: FieldValue,
}

/// An item to be pushed to the search index.
///
/// Fields keep the order in which they were added. When two fields share a
/// name, the later one wins once the item is flattened into a record.
///
/// # Example
///
/// ```
/// use search_adapter_shared::IndexItem;
///
/// let item = IndexItem::new("p1")
///     .with_field("title", vec!["Shoe"])
///     .with_field("price", 42_i64);
/// assert_eq!(item.fields.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexItem {
    /// Unique item identifier; becomes the remote `objectID`.
    pub id: String,
    /// Ordered fields of the item.
    #[serde(default)]
    pub fields: Vec<ItemField>,
}

impl IndexItem {
    /// Create an item with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field and return the item.
    pub fn with_field(mut self, name: impl Into<String>, values: impl Into<FieldValue>) -> Self {
        self.push_field(name, values);
        self
    }

    /// Append a field.
    pub fn push_field(&mut self, name: impl Into<String>, values: impl Into<FieldValue>) {
        self.fields.push(ItemField {
            name: name.into(),
            values: values.into(),
        });
    }
}
