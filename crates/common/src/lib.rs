//! Shared configuration for the nobel-search tools
//!
//! This crate holds everything the other crates agree on: how settings are
//! read from the environment and `.env` files, how secrets are kept out of
//! logs, and how the search resources derive their names from the index and
//! table names.

pub mod dotenv;
pub mod naming;
pub mod secret;
pub mod settings;

// Re-export commonly used types
pub use naming::{
    DEFAULT_TABLE_NAME, data_source_name, indexer_name, semantic_config_name, skillset_name,
    validate_resource_name,
};
pub use secret::Secret;
pub use settings::{
    Environment, IndexSettings, OpenAiSettings, SearchSettings, SettingsError, SqlSettings,
};
