use nobel_search_common::SettingsError;
use nobel_search_db::DbError;
use nobel_search_sdk::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{0}")]
    InvalidName(String),

    #[error("Indexer '{indexer}' failed: {message}")]
    IndexerFailed { indexer: String, message: String },

    #[error("Indexer '{indexer}' did not finish within {waited_secs}s")]
    Timeout { indexer: String, waited_secs: u64 },
}
