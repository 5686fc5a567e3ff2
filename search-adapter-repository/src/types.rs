//! Record and operation summary types for search index operations.

use serde_json::{Map, Value};

use crate::errors::SearchIndexError;

/// Name of the identifier attribute every remote record carries.
pub const OBJECT_ID: &str = "objectID";

/// A flattened, remote-shaped record: `{ "objectID": id, <field>: <values>, ... }`.
pub type Record = Map<String, Value>;

/// Result of a batch operation for a single target.
///
/// The target is a record's `objectID` for index and delete operations, and
/// the collection name for a clear.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The record id or collection name the operation addressed.
    pub id: String,
    /// Whether the remote service confirmed the operation.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    /// A confirmed operation.
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: true,
            error: None,
        }
    }

    /// A failed operation.
    pub fn failed(id: impl Into<String>, error: SearchIndexError) -> Self {
        Self {
            id: id.into(),
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Results keep the order of the input, so [`attempted_ids`](Self::attempted_ids)
/// and [`confirmed_ids`](Self::confirmed_ids) can be compared against what the
/// caller submitted to find partial failures.
#[derive(Debug, Clone)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// A summary of an operation that addressed nothing.
    pub fn empty() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    /// Build a summary from individual results, computing the counters.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Every id the operation attempted, in input order.
    pub fn attempted_ids(&self) -> Vec<String> {
        self.results.iter().map(|r| r.id.clone()).collect()
    }

    /// The ids the remote service confirmed, in input order.
    pub fn confirmed_ids(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.id.clone())
            .collect()
    }

    /// The failed results.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Returns true if every addressed target was confirmed.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}
