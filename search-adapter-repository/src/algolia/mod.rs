//! Algolia implementation of the search client.
//!
//! This module provides the REST client speaking the hosted service's HTTP
//! API, its host/timeout settings and the factory the backend uses to build it.

mod client;
mod client_config;

pub use client::{AlgoliaClient, AlgoliaClientFactory};
pub use client_config::AlgoliaClientConfig;
