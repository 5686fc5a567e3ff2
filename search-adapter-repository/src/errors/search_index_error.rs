//! Search index error types.
//!
//! This module defines the unified error type for all adapter operations,
//! covering configuration problems, per-item validation and failures reported
//! by the remote search service.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `SearchBackend` and `SearchClient` traits for every operation.
/// Remote failures carry the message (and HTTP status, when there is one) as a
/// string so the error stays `Clone` and can be stored in operation summaries.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Missing or malformed credentials.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Validation error (e.g., an item without an id).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to build the client or reach the remote service.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to upsert records.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a record.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to clear a collection.
    #[error("Clear error: {0}")]
    ClearError(String),

    /// Failed to list the remote collections.
    #[error("List error: {0}")]
    ListError(String),

    /// Failed to parse a response from the remote service.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the remote service.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A flattened record exceeds the per-record size limit.
    #[error("Record {object_id} is {size} bytes, exceeding the {max} byte limit")]
    RecordTooLarge {
        object_id: String,
        size: usize,
        max: usize,
    },

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchIndexError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a clear error.
    pub fn clear(msg: impl Into<String>) -> Self {
        Self::ClearError(msg.into())
    }

    /// Create a list error.
    pub fn list(msg: impl Into<String>) -> Self {
        Self::ListError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a record too large error.
    pub fn record_too_large(object_id: impl Into<String>, size: usize, max: usize) -> Self {
        Self::RecordTooLarge {
            object_id: object_id.into(),
            size,
            max,
        }
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Returns true for errors raised by the remote service or the transport,
    /// as opposed to local configuration or validation problems.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_)
                | Self::IndexError(_)
                | Self::DeleteError(_)
                | Self::ClearError(_)
                | Self::ListError(_)
                | Self::ParseError(_)
        )
    }
}
