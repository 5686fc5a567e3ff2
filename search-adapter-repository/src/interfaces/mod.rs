//! Interface definitions for the search adapter.
//!
//! [`SearchBackend`] is what the host indexing pipeline depends on.
//! [`SearchClient`] is the small outbound surface of the hosted search service,
//! created lazily through a [`SearchClientFactory`].

mod search_backend;
mod search_client;

pub use search_backend::SearchBackend;
pub use search_client::{SearchClient, SearchClientFactory};
