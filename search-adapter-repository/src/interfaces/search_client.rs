//! Outbound client trait for the hosted search service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::errors::SearchIndexError;
use crate::types::Record;

/// The remote operations the adapter needs from the hosted search service.
///
/// Implementations are injected into the backend through a
/// [`SearchClientFactory`], which keeps the REST client swappable and lets
/// tests substitute a recording mock.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// List the names of the collections visible to the credentials.
    async fn list_indices(&self) -> Result<Vec<String>, SearchIndexError>;

    /// Upsert records into a collection in one batch call.
    async fn save_records(&self, index: &str, records: &[Record]) -> Result<(), SearchIndexError>;

    /// Delete a single record by its `objectID`.
    async fn delete_record(&self, index: &str, object_id: &str) -> Result<(), SearchIndexError>;

    /// Remove every record from a collection, keeping the collection itself.
    async fn clear_index(&self, index: &str) -> Result<(), SearchIndexError>;
}

/// Builds a [`SearchClient`] from credentials.
///
/// The backend calls this at most once, on the first operation that needs the
/// remote service.
pub trait SearchClientFactory: Send + Sync {
    fn create(&self, credentials: &BackendConfig)
        -> Result<Arc<dyn SearchClient>, SearchIndexError>;
}
