//! # Search Adapter Shared
//!
//! This crate defines the data structures exchanged between the host indexing
//! pipeline and the search adapter: the items to index, the collections they
//! live in, search queries and result sets, and status report entries.

pub mod types;

pub use types::collection::Collection;
pub use types::index_item::{FieldValue, IndexItem, ItemField};
pub use types::search_query::{SearchQuery, SortDirection};
pub use types::search_result::{ResultItem, SearchResultSet};
pub use types::status::StatusEntry;
