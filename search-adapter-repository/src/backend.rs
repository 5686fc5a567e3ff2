//! Search backend implementation for the hosted search service.
//!
//! This module provides the backend the host indexing pipeline talks to. It
//! flattens items into records, pushes them through a lazily created
//! connection, and reports per-id outcomes for every mutating operation.
//!
//! # Note on Searching
//!
//! The hosted service owns all query logic and this backend exposes none of
//! it: `search` always returns an empty result set.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use search_adapter_shared::{Collection, IndexItem, SearchQuery, SearchResultSet, StatusEntry};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::algolia::AlgoliaClientFactory;
use crate::config::{AdapterConfig, BackendConfig, FailurePolicy};
use crate::connection::{CollectionHandle, Connection};
use crate::errors::SearchIndexError;
use crate::interfaces::{SearchBackend, SearchClientFactory};
use crate::types::{BatchOperationResult, BatchOperationSummary, Record};
use crate::utils::{flatten_item, record_size};

/// The backend pushing host items to an Algolia application.
///
/// A backend starts out configured but unconnected. The remote client is
/// created on the first operation that needs it and reused for the lifetime
/// of the backend; binding to a collection is cheap and happens per call, so
/// consecutive operations may target different collections.
///
/// # Example
///
/// ```no_run
/// use search_adapter_repository::{AlgoliaBackend, BackendConfig, SearchBackend};
/// use search_adapter_shared::{Collection, IndexItem};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = AlgoliaBackend::configure(BackendConfig::new("A1", "K1"))?;
///
/// let items = vec![
///     IndexItem::new("p1").with_field("title", vec!["Shoe"]),
///     IndexItem::new("p2").with_field("title", vec!["Hat"]),
/// ];
/// let summary = backend.index_items(&Collection::new("products"), &items).await?;
/// assert_eq!(summary.confirmed_ids(), vec!["p1", "p2"]);
/// # Ok(())
/// # }
/// ```
pub struct AlgoliaBackend {
    config: BackendConfig,
    adapter_config: AdapterConfig,
    factory: Arc<dyn SearchClientFactory>,
    connection: OnceCell<Connection>,
}

impl AlgoliaBackend {
    /// Create a backend with custom behavior settings and the default REST client.
    pub fn with_adapter_config(
        config: BackendConfig,
        adapter_config: AdapterConfig,
    ) -> Result<Self, SearchIndexError> {
        Self::with_factory(
            config,
            adapter_config,
            Arc::new(AlgoliaClientFactory::default()),
        )
    }

    /// Create a backend that builds its remote client with `factory`.
    ///
    /// # Returns
    ///
    /// * `Ok(AlgoliaBackend)` - A configured, not yet connected backend
    /// * `Err(SearchIndexError::ConfigurationError)` - If a credential is missing
    pub fn with_factory(
        config: BackendConfig,
        adapter_config: AdapterConfig,
        factory: Arc<dyn SearchClientFactory>,
    ) -> Result<Self, SearchIndexError> {
        config.validate()?;

        info!(
            application_id = %config.application_id,
            max_batch_size = ?adapter_config.max_batch_size,
            max_record_bytes = ?adapter_config.max_record_bytes,
            error_policy = ?adapter_config.error_policy,
            "Configured search backend"
        );

        Ok(Self {
            config,
            adapter_config,
            factory,
            connection: OnceCell::new(),
        })
    }

    /// The behavior settings of this backend.
    pub fn adapter_config(&self) -> &AdapterConfig {
        &self.adapter_config
    }

    /// Returns true once the remote client has been created.
    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    /// Connect to the remote service, creating the client on first use.
    ///
    /// Later calls return the same connection.
    pub async fn connect(&self) -> Result<&Connection, SearchIndexError> {
        self.connection
            .get_or_try_init(|| async {
                let client = self.factory.create(&self.config)?;
                info!(
                    application_id = %self.config.application_id,
                    "Connected to search service"
                );
                Ok::<Connection, SearchIndexError>(Connection::new(client))
            })
            .await
    }

    /// Connect and bind to a collection.
    ///
    /// Each call binds to the collection it is given, even when the
    /// connection already existed.
    pub async fn connect_to(
        &self,
        collection: &Collection,
    ) -> Result<CollectionHandle, SearchIndexError> {
        Ok(self.connect().await?.collection(collection.name.clone()))
    }

    /// Check whether a collection exists on the remote service.
    pub async fn has_collection(&self, collection: &Collection) -> Result<bool, SearchIndexError> {
        let names = self.connect().await?.list_collections().await?;
        Ok(names.iter().any(|name| name == &collection.name))
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.adapter_config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Flatten an item and check it against the record size limit.
    fn prepare_record(&self, item: &IndexItem) -> Result<Record, SearchIndexError> {
        let record = flatten_item(item)?;
        if let Some(max) = self.adapter_config.max_record_bytes {
            let size = record_size(&record)?;
            if size > max {
                return Err(SearchIndexError::record_too_large(&item.id, size, max));
            }
        }
        Ok(record)
    }

    /// Apply a failure policy to a remote error.
    ///
    /// Returns the error back for recording under `Report`, or fails the
    /// whole operation under `Propagate`. Local errors always fail it.
    fn absorb(
        policy: FailurePolicy,
        error: SearchIndexError,
    ) -> Result<SearchIndexError, SearchIndexError> {
        if !error.is_remote() {
            return Err(error);
        }
        match policy {
            FailurePolicy::Report => Ok(error),
            FailurePolicy::Propagate => Err(error),
        }
    }
}

#[async_trait]
impl SearchBackend for AlgoliaBackend {
    fn configure(config: BackendConfig) -> Result<Self, SearchIndexError> {
        Self::with_adapter_config(config, AdapterConfig::default())
    }

    fn configuration(&self) -> &BackendConfig {
        &self.config
    }

    /// Flatten all items and send them as one batch upsert.
    ///
    /// Items with an empty id, a repeated id or an oversized record are not
    /// sent and are reported as failed. The first item carrying an id wins. If
    /// the batch call fails, none of the sent items is confirmed.
    async fn index_items(
        &self,
        collection: &Collection,
        items: &[IndexItem],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if items.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(items.len())?;

        let handle = self.connect_to(collection).await?;

        let mut results = Vec::with_capacity(items.len());
        let mut records = Vec::with_capacity(items.len());
        let mut sent = Vec::with_capacity(items.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());

        for item in items {
            let prepared = if seen.insert(item.id.as_str()) {
                self.prepare_record(item)
            } else {
                Err(SearchIndexError::validation(format!(
                    "duplicate item id '{}'",
                    item.id
                )))
            };

            match prepared {
                Ok(record) => {
                    sent.push(results.len());
                    records.push(record);
                    results.push(BatchOperationResult::succeeded(&item.id));
                }
                Err(e) => {
                    warn!(
                        collection = %collection.name,
                        item_id = %item.id,
                        error = %e,
                        "Item rejected before indexing"
                    );
                    results.push(BatchOperationResult::failed(&item.id, e));
                }
            }
        }

        if !records.is_empty() {
            if let Err(e) = handle.save_records(&records).await {
                let error = Self::absorb(self.adapter_config.error_policy.index, e)?;
                warn!(
                    collection = %collection.name,
                    count = records.len(),
                    error = %error,
                    "Batch upsert failed, no items were indexed"
                );
                for position in sent {
                    let result = &mut results[position];
                    result.success = false;
                    result.error = Some(error.clone());
                }
            }
        }

        let summary = BatchOperationSummary::from_results(results);
        debug!(
            collection = %collection.name,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Indexed items"
        );
        Ok(summary)
    }

    /// Delete records one id at a time, in order.
    ///
    /// Under the `Report` policy a failed delete is recorded and the remaining
    /// ids are still processed.
    async fn delete_items(
        &self,
        collection: &Collection,
        ids: &[String],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if ids.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        let handle = self.connect_to(collection).await?;

        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            if id.trim().is_empty() {
                results.push(BatchOperationResult::failed(
                    id,
                    SearchIndexError::validation("record id is required"),
                ));
                continue;
            }

            match handle.delete_record(id).await {
                Ok(()) => results.push(BatchOperationResult::succeeded(id)),
                Err(e) => {
                    let error = Self::absorb(self.adapter_config.error_policy.delete, e)?;
                    warn!(
                        collection = %collection.name,
                        object_id = %id,
                        error = %error,
                        "Failed to delete record"
                    );
                    results.push(BatchOperationResult::failed(id, error));
                }
            }
        }

        let summary = BatchOperationSummary::from_results(results);
        debug!(
            collection = %collection.name,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Deleted items"
        );
        Ok(summary)
    }

    async fn delete_all_items(
        &self,
        collection: Option<&Collection>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let Some(collection) = collection else {
            debug!("No collection given, nothing to clear");
            return Ok(BatchOperationSummary::empty());
        };

        let handle = self.connect_to(collection).await?;

        let result = match handle.clear().await {
            Ok(()) => {
                info!(collection = %collection.name, "Cleared collection");
                BatchOperationResult::succeeded(&collection.name)
            }
            Err(e) => {
                let error = Self::absorb(self.adapter_config.error_policy.clear, e)?;
                warn!(
                    collection = %collection.name,
                    error = %error,
                    "Failed to clear collection"
                );
                BatchOperationResult::failed(&collection.name, error)
            }
        };

        Ok(BatchOperationSummary::from_results(vec![result]))
    }

    fn search(&self, _query: &SearchQuery) -> SearchResultSet {
        debug!("Search is not supported by this backend, returning no results");
        SearchResultSet::empty()
    }

    async fn view_status(&self) -> Result<Vec<StatusEntry>, SearchIndexError> {
        let connection = self.connect().await?;
        let indexes = connection.list_collections().await?;

        Ok(vec![
            StatusEntry::new("Application ID", &self.config.application_id),
            StatusEntry::new("API Key", &self.config.api_key),
            StatusEntry::new("Available Algolia indexes", indexes.join(", ")),
        ])
    }
}
