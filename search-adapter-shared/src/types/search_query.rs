//! Search query types for the search adapter.
//!
//! The host pipeline hands a query object to every backend. This adapter
//! advertises no query capability and never inspects it, but the type is
//! still modelled so the backend interface is complete.

use serde::{Deserialize, Serialize};

/// Sort direction for a sort clause.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Search query parameters as issued by the host pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// Free-text keys, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,

    /// Field equality filters as `(field, value)` pairs.
    #[serde(default)]
    pub filters: Vec<(String, String)>,

    /// Sort clauses in priority order.
    #[serde(default)]
    pub sort: Vec<(String, SortDirection)>,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of results to return. `None` means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Create a free-text query with no filters, sort or paging.
    ///
    /// # Example
    ///
    /// ```
    /// use search_adapter_shared::SearchQuery;
    ///
    /// let query = SearchQuery::keys("running shoes").with_limit(10);
    /// assert_eq!(query.limit, Some(10));
    /// ```
    pub fn keys(keys: impl Into<String>) -> Self {
        Self {
            keys: Some(keys.into()),
            ..Self::default()
        }
    }

    /// Add a field equality filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Add a sort clause.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Set the offset for pagination.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the limit for results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
