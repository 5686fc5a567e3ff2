//! Configuration and dependency initialization for the search adapter.

mod dependencies;

pub use dependencies::Dependencies;
