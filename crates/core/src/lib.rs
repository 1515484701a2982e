//! Nobel Prize search pipeline.
//!
//! Builds the index, skillset, data source and indexer definitions for the
//! winners table, runs the provisioning steps against the search service,
//! loads the table, and shapes the sample queries.

pub mod definitions;
pub mod error;
pub mod loader;
pub mod provision;
pub mod query;

pub use error::ProvisionError;
pub use loader::{LoadReport, LoadTimings, load_table};
pub use provision::{IndexerRunSummary, Provisioner, RunTicket, WaitOptions};
pub use query::{QueryOptions, SearchMode, build_request, is_quit, render_response};
