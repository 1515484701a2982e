//! Typed REST client for Azure AI Search.
//!
//! Covers the slice of the service API needed to provision an integrated
//! vectorization pipeline: indexes, skillsets, data source connections,
//! indexers (create, run, status) and document search.

pub mod client;
pub mod error;
pub mod models;

pub use client::SearchServiceClient;
pub use error::SearchError;
