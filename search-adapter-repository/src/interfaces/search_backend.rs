//! Search backend trait definition.
//!
//! This module defines the interface the host indexing pipeline calls into.
//! It replaces plugin discovery: the pipeline holds a `Box<dyn SearchBackend>`
//! and never needs to know which hosted service sits behind it.

use async_trait::async_trait;
use search_adapter_shared::{Collection, IndexItem, SearchQuery, SearchResultSet, StatusEntry};
use tracing::debug;

use crate::config::BackendConfig;
use crate::errors::SearchIndexError;
use crate::types::BatchOperationSummary;

/// Abstracts a hosted search index behind the operations of an indexing pipeline.
///
/// All mutating operations return a [`BatchOperationSummary`] so that partial
/// failures are visible to the caller. Whether a remote failure is recorded in
/// the summary or returned as an error is decided by the backend's
/// `ErrorPolicy`, the same way for every operation.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Build a backend from validated credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - A configured backend, not yet connected
    /// * `Err(SearchIndexError::ConfigurationError)` - If a credential is missing
    fn configure(config: BackendConfig) -> Result<Self, SearchIndexError>
    where
        Self: Sized;

    /// The credentials this backend was configured with.
    fn configuration(&self) -> &BackendConfig;

    /// Push items to a collection, creating or replacing their records.
    ///
    /// # Arguments
    ///
    /// * `collection` - The target collection
    /// * `items` - The items to index, in the order their ids are reported
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Attempted and confirmed ids
    /// * `Err(SearchIndexError)` - On configuration/batch size errors, or a
    ///   remote failure under the `Propagate` policy
    async fn index_items(
        &self,
        collection: &Collection,
        items: &[IndexItem],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Delete records by id, one remote call per id.
    async fn delete_items(
        &self,
        collection: &Collection,
        ids: &[String],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Clear every record of a collection. Does nothing without a collection.
    async fn delete_all_items(
        &self,
        collection: Option<&Collection>,
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Drop a collection's data when the host removes the collection.
    ///
    /// Read-only collections are left untouched.
    async fn remove_collection(
        &self,
        collection: &Collection,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if collection.read_only {
            debug!(collection = %collection.name, "Leaving read-only collection untouched");
            return Ok(BatchOperationSummary::empty());
        }
        self.delete_all_items(Some(collection)).await
    }

    /// Run a search query.
    ///
    /// Backends without query capability return an empty result set, which
    /// callers must read as "unsupported".
    fn search(&self, query: &SearchQuery) -> SearchResultSet;

    /// Describe the backend's configuration and remote state.
    async fn view_status(&self) -> Result<Vec<StatusEntry>, SearchIndexError>;
}
