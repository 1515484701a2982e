//! Indexers and their execution status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skillset_name: Option<String>,
    pub target_index_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(rename = "@odata.etag", default, skip_serializing)]
    pub etag: Option<String>,
}

/// Response of `GET indexers('{name}')/search.status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerStatus {
    pub status: IndexerServiceStatus,
    #[serde(default)]
    pub last_result: Option<IndexerExecutionResult>,
    #[serde(default)]
    pub execution_history: Vec<IndexerExecutionResult>,
}

/// Overall health of the indexer, independent of any single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexerServiceStatus {
    Running,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerExecutionResult {
    pub status: IndexerExecutionStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items_processed: i64,
    #[serde(default)]
    pub items_failed: i64,
    #[serde(default)]
    pub errors: Vec<IndexerIssue>,
    #[serde(default)]
    pub warnings: Vec<IndexerIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexerExecutionStatus {
    TransientFailure,
    Success,
    InProgress,
    Reset,
    #[serde(other)]
    Unknown,
}

impl IndexerExecutionStatus {
    /// Whether a run in this state will not change any more.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            IndexerExecutionStatus::Success | IndexerExecutionStatus::TransientFailure
        )
    }
}

/// A per-document error or warning reported by an indexer run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerIssue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, alias = "errorMessage")]
    pub message: Option<String>,
    #[serde(default)]
    pub status_code: Option<i32>,
}
