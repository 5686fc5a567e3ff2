//! Status report rendering.
//!
//! The backend reports its credentials verbatim, as the settings page shows
//! them. Before a report reaches the logs the API key is masked.

use search_adapter_repository::SearchBackend;
use search_adapter_shared::StatusEntry;

use crate::{AdapterError, Dependencies};

/// Label of the status entry holding the API key.
pub const API_KEY_LABEL: &str = "API Key";

/// Label of the status entry for the collection named by `ALGOLIA_INDEX`.
pub const TARGET_INDEX_LABEL: &str = "Target index";

/// Build the status report for the configured backend.
///
/// When a target collection is configured, an extra entry says whether it
/// exists on the remote service.
pub async fn report(deps: &Dependencies) -> Result<Vec<StatusEntry>, AdapterError> {
    let mut entries = deps.backend.view_status().await?;

    if let Some(collection) = &deps.collection {
        let state = if deps.backend.has_collection(collection).await? {
            "found"
        } else {
            "missing"
        };
        entries.push(StatusEntry::new(
            TARGET_INDEX_LABEL,
            format!("{} ({})", collection.name, state),
        ));
    }

    Ok(entries)
}

/// Number of trailing characters of a secret left visible.
const VISIBLE_SUFFIX: usize = 4;

/// Mask all but the last few characters of a secret.
///
/// Secrets too short to keep a suffix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= VISIBLE_SUFFIX * 2 {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - VISIBLE_SUFFIX;
    let suffix: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), suffix)
}

/// Copy a status report, masking the API key entry.
pub fn redact(entries: &[StatusEntry]) -> Vec<StatusEntry> {
    entries
        .iter()
        .map(|entry| {
            if entry.label == API_KEY_LABEL {
                StatusEntry::new(&entry.label, mask_secret(&entry.value))
            } else {
                entry.clone()
            }
        })
        .collect()
}
