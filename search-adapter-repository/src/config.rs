//! Configuration types for the search backend.
//!
//! [`BackendConfig`] holds the credentials entered through the settings form.
//! [`AdapterConfig`] controls an optional batch cap, the client-side record
//! size check and how remote failures are surfaced by each mutating operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SearchIndexError;

/// Maximum length of each credential, as accepted by the settings form.
pub const CREDENTIAL_MAX_LENGTH: usize = 128;

/// Default per-record size limit of the hosted service (10 KB).
pub const DEFAULT_MAX_RECORD_BYTES: usize = 10 * 1024;

const LICENSING_URL: &str = "https://www.algolia.com/licensing";

/// Credentials for the hosted search service.
///
/// Both values are required and checked by [`BackendConfig::validate`] before
/// a backend can be built from them. Invalid (but present) credentials only
/// surface once a remote call fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// The application ID of the search service subscription.
    pub application_id: String,
    /// The API key of the search service subscription.
    pub api_key: String,
}

impl BackendConfig {
    /// Create a configuration from the two credentials.
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: api_key.into(),
        }
    }

    /// The empty configuration a freshly added backend starts with.
    pub fn default_configuration() -> Self {
        Self::default()
    }

    /// Check that both credentials are present and fit the form's limits.
    ///
    /// The application ID becomes part of the service host name, so it must be
    /// ASCII alphanumeric.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If both credentials are usable
    /// * `Err(SearchIndexError::ConfigurationError)` - Naming the offending field
    pub fn validate(&self) -> Result<(), SearchIndexError> {
        Self::validate_field("application_id", &self.application_id)?;
        Self::validate_field("api_key", &self.api_key)?;
        if !self
            .application_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
        {
            return Err(SearchIndexError::configuration(
                "application_id may only contain letters and digits",
            ));
        }
        Ok(())
    }

    fn validate_field(name: &str, value: &str) -> Result<(), SearchIndexError> {
        if value.trim().is_empty() {
            return Err(SearchIndexError::configuration(format!(
                "{} is required",
                name
            )));
        }
        if value.chars().count() > CREDENTIAL_MAX_LENGTH {
            return Err(SearchIndexError::configuration(format!(
                "{} must be at most {} characters",
                name, CREDENTIAL_MAX_LENGTH
            )));
        }
        Ok(())
    }
}

/// Description of one input of the backend settings form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsField {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub size: usize,
    pub max_length: usize,
}

/// The backend settings form: a help line and the credential inputs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsForm {
    pub help: String,
    pub fields: Vec<SettingsField>,
}

/// Build the settings form shown to administrators.
pub fn settings_form() -> SettingsForm {
    SettingsForm {
        help: format!(
            "The application ID and API key can be found and configured at {}.",
            LICENSING_URL
        ),
        fields: vec![
            SettingsField {
                key: "application_id",
                title: "Application ID",
                description: "The application ID from your Algolia subscription.",
                required: true,
                size: 60,
                max_length: CREDENTIAL_MAX_LENGTH,
            },
            SettingsField {
                key: "api_key",
                title: "API Key",
                description: "The API key from your Algolia subscription.",
                required: true,
                size: 60,
                max_length: CREDENTIAL_MAX_LENGTH,
            },
        ],
    }
}

/// What a mutating operation does when the remote service rejects a call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log a warning and record the failure in the operation summary.
    #[default]
    Report,
    /// Return the first remote failure as an error.
    Propagate,
}

impl FromStr for FailurePolicy {
    type Err = SearchIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "propagate" => Ok(Self::Propagate),
            other => Err(SearchIndexError::configuration(format!(
                "unknown failure policy '{}', expected 'report' or 'propagate'",
                other
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Propagate => f.write_str("propagate"),
        }
    }
}

/// Failure policy for each mutating operation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPolicy {
    /// Policy for `index_items`.
    #[serde(default)]
    pub index: FailurePolicy,
    /// Policy for `delete_items`.
    #[serde(default)]
    pub delete: FailurePolicy,
    /// Policy for `delete_all_items` and `remove_collection`.
    #[serde(default)]
    pub clear: FailurePolicy,
}

impl ErrorPolicy {
    /// Apply the same policy to every operation.
    pub fn uniform(policy: FailurePolicy) -> Self {
        Self {
            index: policy,
            delete: policy,
            clear: policy,
        }
    }
}

/// Behavior settings for the backend.
///
/// This struct allows customization of the batch cap, the client-side record
/// size check and failure handling. By default any number of items goes out
/// in one upsert, records over 10 KB are rejected before sending, and remote
/// failures are reported in the operation summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Maximum number of items accepted by one `index_items` call.
    ///
    /// `None` (the default) sends every item in a single upsert.
    pub max_batch_size: Option<usize>,

    /// Maximum serialized size of a single record, in bytes.
    ///
    /// Set to `None` to send records of any size and let the remote service
    /// decide.
    pub max_record_bytes: Option<usize>,

    /// How remote failures are surfaced.
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_batch_size: None,
            max_record_bytes: Some(DEFAULT_MAX_RECORD_BYTES),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl AdapterConfig {
    /// Create a config with no batch size or record size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            max_record_bytes: None,
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Set a custom batch size limit.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    /// Set a custom record size limit.
    pub fn with_max_record_bytes(mut self, max_record_bytes: usize) -> Self {
        self.max_record_bytes = Some(max_record_bytes);
        self
    }

    /// Set the failure policy.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_credentials() {
        assert!(BackendConfig::new("A1", "K1").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let result = BackendConfig::default_configuration().validate();
        assert!(matches!(
            result,
            Err(SearchIndexError::ConfigurationError(ref msg)) if msg.contains("application_id")
        ));

        let result = BackendConfig::new("A1", "   ").validate();
        assert!(matches!(
            result,
            Err(SearchIndexError::ConfigurationError(ref msg)) if msg.contains("api_key")
        ));
    }

    #[test]
    fn test_validate_rejects_overlong_credentials() {
        let long = "k".repeat(CREDENTIAL_MAX_LENGTH + 1);
        assert!(BackendConfig::new("A1", long).validate().is_err());

        let exact = "k".repeat(CREDENTIAL_MAX_LENGTH);
        assert!(BackendConfig::new("A1", exact).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_host_characters_in_application_id() {
        for application_id in ["evil.example#", "a1.example.com", "A1/x", "A 1", "A1-dsn"] {
            let result = BackendConfig::new(application_id, "K1").validate();
            assert!(
                matches!(
                    result,
                    Err(SearchIndexError::ConfigurationError(ref msg)) if msg.contains("application_id")
                ),
                "{} should be rejected",
                application_id
            );
        }

        assert!(BackendConfig::new("LATENCY42", "K1").validate().is_ok());
    }

    #[test]
    fn test_settings_form_fields() {
        let form = settings_form();
        assert!(form.help.contains(LICENSING_URL));

        let keys: Vec<&str> = form.fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["application_id", "api_key"]);
        assert!(form.fields.iter().all(|f| f.required));
        assert!(form.fields.iter().all(|f| f.max_length == 128));
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!("report".parse::<FailurePolicy>().unwrap(), FailurePolicy::Report);
        assert_eq!(
            " Propagate ".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::Propagate
        );
        assert!("swallow".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_adapter_config_defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.max_batch_size, None);
        assert_eq!(config.max_record_bytes, Some(10 * 1024));
        assert_eq!(config.error_policy, ErrorPolicy::uniform(FailurePolicy::Report));
    }

    #[test]
    fn test_adapter_config_unlimited() {
        let config = AdapterConfig::unlimited();
        assert!(config.max_batch_size.is_none());
        assert!(config.max_record_bytes.is_none());
    }

    #[test]
    fn test_backend_config_deserialize() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"application_id": "A1", "api_key": "K1"}"#).unwrap();
        assert_eq!(config, BackendConfig::new("A1", "K1"));
    }
}
