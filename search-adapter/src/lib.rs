//! # Search Adapter
//!
//! Wiring for the hosted search index adapter: reads the backend settings from
//! the environment, builds the backend and renders its status report.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`status`]: Status report rendering

pub mod config;
pub mod status;

pub use config::Dependencies;

use search_adapter_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur during adapter initialization or execution.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the search backend.
    #[error("Backend error: {0}")]
    BackendError(#[from] SearchIndexError),
}

impl AdapterError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
