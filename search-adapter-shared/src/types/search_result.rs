//! Search result types for the search adapter.
//!
//! This module defines the result set returned from search operations.

use serde::{Deserialize, Serialize};

/// A single search result item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    /// The matched item's identifier.
    pub id: String,

    /// Relevance score reported by the search engine.
    pub score: f64,
}

/// Result set handed back to the host pipeline.
///
/// An empty result set from a backend without query capability means
/// "unsupported", not "zero matches".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultSet {
    /// The result items.
    pub items: Vec<ResultItem>,

    /// Total number of matching items.
    pub count: u64,
}

impl SearchResultSet {
    /// Create an empty result set.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }

    /// Create a new result set.
    pub fn new(items: Vec<ResultItem>, count: u64) -> Self {
        Self { items, count }
    }

    /// Returns true if there are no results.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of results in this set.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
