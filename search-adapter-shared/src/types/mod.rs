//! This module defines the core data structures used across the search adapter.
//! It re-exports the item, collection, query, result and status types.

pub mod collection;
pub mod index_item;
pub mod search_query;
pub mod search_result;
pub mod status;

pub use collection::Collection;
pub use index_item::{FieldValue, IndexItem, ItemField};
pub use search_query::{SearchQuery, SortDirection};
pub use search_result::{ResultItem, SearchResultSet};
pub use status::StatusEntry;
