//! # Search Adapter Repository
//!
//! This crate lets a content indexing pipeline push items to, and delete
//! items from, a hosted search index service. It includes the backend
//! interface the pipeline depends on, the outbound client interface, a REST
//! implementation for Algolia, and the backend tying them together.

pub mod algolia;
pub mod backend;
pub mod config;
pub mod connection;
pub mod errors;
pub mod interfaces;
pub mod types;
pub mod utils;

pub use backend::AlgoliaBackend;
pub use config::{
    settings_form, AdapterConfig, BackendConfig, ErrorPolicy, FailurePolicy, SettingsField,
    SettingsForm,
};
pub use connection::{CollectionHandle, Connection};
pub use errors::SearchIndexError;
pub use interfaces::{SearchBackend, SearchClient, SearchClientFactory};
pub use types::{BatchOperationResult, BatchOperationSummary, Record, OBJECT_ID};
pub use utils::{flatten_item, record_size};
