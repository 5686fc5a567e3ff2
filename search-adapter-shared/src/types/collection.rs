//! Collection descriptor passed in by the host pipeline.

use serde::{Deserialize, Serialize};

/// A named remote container of searchable records.
///
/// The adapter only needs the name to address the remote collection and the
/// read-only flag to guard irreversible operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    /// Name of the remote collection.
    pub name: String,
    /// Read-only collections are never cleared by `remove_collection`.
    #[serde(default)]
    pub read_only: bool,
}

impl Collection {
    /// Create a writable collection descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
        }
    }

    /// Create a read-only collection descriptor.
    pub fn read_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: true,
        }
    }
}
