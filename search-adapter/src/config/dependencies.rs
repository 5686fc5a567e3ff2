//! Dependency initialization and wiring for the search adapter.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use search_adapter_repository::algolia::{AlgoliaClientConfig, AlgoliaClientFactory};
use search_adapter_repository::config::DEFAULT_MAX_RECORD_BYTES;
use search_adapter_repository::{
    AdapterConfig, AlgoliaBackend, BackendConfig, ErrorPolicy, FailurePolicy,
};
use search_adapter_shared::Collection;
use tracing::{info, warn};

use crate::AdapterError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Value disabling a size limit.
const UNLIMITED: &str = "unlimited";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured, not yet connected backend.
    pub backend: AlgoliaBackend,
    /// The collection named by `ALGOLIA_INDEX`, if any.
    pub collection: Option<Collection>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ALGOLIA_APPLICATION_ID`: Application ID (required)
    /// - `ALGOLIA_API_KEY`: API key (required)
    /// - `ALGOLIA_INDEX`: Collection to target (optional)
    /// - `ALGOLIA_WRITE_HOST` / `ALGOLIA_READ_HOST`: Host overrides (optional)
    /// - `ALGOLIA_TIMEOUT_SECS`: Request timeout in seconds, at least 1 (default: 30)
    /// - `ADAPTER_MAX_BATCH_SIZE`: Items per `index_items` call, or "unlimited" (default: unlimited)
    /// - `ADAPTER_MAX_RECORD_BYTES`: Bytes per record, or "unlimited" (default: 10240)
    /// - `ADAPTER_FAILURE_POLICY`: "report" or "propagate" (default: report)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AdapterError)` - If a credential is missing or a setting is invalid
    pub fn new() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Initialize all dependencies from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let application_id = Self::required(&lookup, "ALGOLIA_APPLICATION_ID")?;
        let api_key = Self::required(&lookup, "ALGOLIA_API_KEY")?;
        let collection = lookup("ALGOLIA_INDEX")
            .filter(|name| !name.trim().is_empty())
            .map(Collection::new);

        let timeout_secs = Self::timeout_secs(&lookup)?;
        let client_config = AlgoliaClientConfig {
            write_host: lookup("ALGOLIA_WRITE_HOST"),
            read_host: lookup("ALGOLIA_READ_HOST"),
            timeout: Duration::from_secs(timeout_secs),
        };

        let failure_policy = match lookup("ADAPTER_FAILURE_POLICY") {
            Some(value) => value
                .parse::<FailurePolicy>()
                .map_err(|e| AdapterError::config(e.to_string()))?,
            None => FailurePolicy::default(),
        };

        let adapter_config = AdapterConfig {
            max_batch_size: Self::limit(&lookup, "ADAPTER_MAX_BATCH_SIZE", None),
            max_record_bytes: Self::limit(
                &lookup,
                "ADAPTER_MAX_RECORD_BYTES",
                Some(DEFAULT_MAX_RECORD_BYTES),
            ),
            error_policy: ErrorPolicy::uniform(failure_policy),
        };

        info!(
            application_id = %application_id,
            collection = ?collection.as_ref().map(|c| c.name.as_str()),
            write_host = ?client_config.write_host,
            read_host = ?client_config.read_host,
            timeout_secs,
            failure_policy = %failure_policy,
            "Initializing dependencies"
        );

        let backend = AlgoliaBackend::with_factory(
            BackendConfig::new(application_id, api_key),
            adapter_config,
            Arc::new(AlgoliaClientFactory::new(client_config)),
        )?;

        Ok(Self {
            backend,
            collection,
        })
    }

    fn required<F>(lookup: &F, key: &str) -> Result<String, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(AdapterError::config(format!("{} must be set", key))),
        }
    }

    /// Parse the request timeout, falling back to the default on bad input.
    ///
    /// A zero timeout would fail every request and is rejected.
    fn timeout_secs<F>(lookup: &F) -> Result<u64, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(value) = lookup("ALGOLIA_TIMEOUT_SECS") else {
            return Ok(DEFAULT_TIMEOUT_SECS);
        };
        match value.trim().parse::<u64>() {
            Ok(0) => Err(AdapterError::config(
                "ALGOLIA_TIMEOUT_SECS must be at least 1",
            )),
            Ok(secs) => Ok(secs),
            Err(_) => {
                warn!(
                    key = "ALGOLIA_TIMEOUT_SECS",
                    value = %value,
                    default = DEFAULT_TIMEOUT_SECS,
                    "Invalid timeout, using default"
                );
                Ok(DEFAULT_TIMEOUT_SECS)
            }
        }
    }

    /// Parse an optional size limit, falling back to `default` on bad input.
    fn limit<F>(lookup: &F, key: &str, default: Option<usize>) -> Option<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(value) = lookup(key) else {
            return default;
        };
        if value.trim().eq_ignore_ascii_case(UNLIMITED) {
            return None;
        }
        match value.trim().parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                warn!(key, value = %value, default = ?default, "Invalid limit, using default");
                default
            }
        }
    }
}
