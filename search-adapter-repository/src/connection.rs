//! Connection handles to the hosted search service.
//!
//! A [`Connection`] wraps the remote client created from one set of
//! credentials. Record-level operations live on [`CollectionHandle`], which is
//! only obtainable from a connection, so nothing can touch a collection before
//! the backend has connected.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchClient;
use crate::types::Record;

/// A live client bound to one set of credentials.
#[derive(Clone)]
pub struct Connection {
    client: Arc<dyn SearchClient>,
}

impl Connection {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Bind to a collection by name.
    ///
    /// Binding is local; the remote service is not contacted until an
    /// operation is issued on the handle.
    pub fn collection(&self, name: impl Into<String>) -> CollectionHandle {
        let name = name.into();
        debug!(collection = %name, "Bound collection handle");
        CollectionHandle {
            client: Arc::clone(&self.client),
            name,
        }
    }

    /// List the collection names visible to the credentials.
    pub async fn list_collections(&self) -> Result<Vec<String>, SearchIndexError> {
        self.client.list_indices().await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

/// A connection bound to a single remote collection.
#[derive(Clone)]
pub struct CollectionHandle {
    client: Arc<dyn SearchClient>,
    name: String,
}

impl CollectionHandle {
    /// Name of the bound collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upsert records in one batch call.
    pub async fn save_records(&self, records: &[Record]) -> Result<(), SearchIndexError> {
        self.client.save_records(&self.name, records).await
    }

    /// Delete one record by `objectID`.
    pub async fn delete_record(&self, object_id: &str) -> Result<(), SearchIndexError> {
        self.client.delete_record(&self.name, object_id).await
    }

    /// Remove every record of the collection.
    pub async fn clear(&self) -> Result<(), SearchIndexError> {
        self.client.clear_index(&self.name).await
    }
}

impl fmt::Debug for CollectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
