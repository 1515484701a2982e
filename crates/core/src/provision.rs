//! Provisioning steps against the search service.

use std::time::Duration;

use chrono::{DateTime, Utc};
use nobel_search_common::{
    IndexSettings, OpenAiSettings, SearchSettings, SqlSettings, indexer_name,
    validate_resource_name,
};
use nobel_search_sdk::SearchServiceClient;
use nobel_search_sdk::models::{
    IndexerExecutionResult, IndexerExecutionStatus, IndexerServiceStatus, IndexerStatus,
    SearchIndex, SearchIndexer, SearchIndexerDataSourceConnection, SearchIndexerSkill,
    SearchIndexerSkillset, VectorSearchAlgorithm,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::definitions::{nobel_data_source, nobel_index, nobel_indexer, nobel_skillset};
use crate::error::ProvisionError;

/// Runs the provisioning steps for one table against one search service.
#[derive(Debug, Clone)]
pub struct Provisioner {
    client: SearchServiceClient,
    table: String,
}

/// Marks an indexer run request, so a later wait can tell the new run from
/// the one that was reported before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub indexer: String,
    pub previous_start: Option<DateTime<Utc>>,
    /// Start of a run that was already going when the request was refused.
    pub joined_start: Option<DateTime<Utc>>,
}

impl RunTicket {
    /// A run without a start time is never the awaited one.
    fn is_awaited(&self, result: &IndexerExecutionResult) -> bool {
        match (result.start_time, self.joined_start) {
            (None, _) => false,
            (Some(start), Some(joined)) => start >= joined,
            (Some(start), None) => Some(start) != self.previous_start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerRunSummary {
    pub indexer: String,
    pub items_processed: i64,
    pub items_failed: i64,
    pub warnings: usize,
    pub duration: Option<chrono::Duration>,
}

impl IndexerRunSummary {
    fn from_result(indexer: &str, result: &IndexerExecutionResult) -> Self {
        let duration = result
            .start_time
            .zip(result.end_time)
            .map(|(start, end)| end - start);
        Self {
            indexer: indexer.to_string(),
            items_processed: result.items_processed,
            items_failed: result.items_failed,
            warnings: result.warnings.len(),
            duration,
        }
    }
}

impl Provisioner {
    pub fn new(client: SearchServiceClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn from_settings(
        search: &SearchSettings,
        table: impl Into<String>,
    ) -> Result<Self, ProvisionError> {
        let client = SearchServiceClient::new(
            &search.endpoint,
            search.api_key.expose(),
            search.api_version.clone(),
        )?;
        Ok(Self::new(client, table))
    }

    pub async fn create_data_source(
        &self,
        sql: &SqlSettings,
    ) -> Result<SearchIndexerDataSourceConnection, ProvisionError> {
        let definition = nobel_data_source(&self.table, sql);
        validate_resource_name(&definition.name).map_err(ProvisionError::InvalidName)?;
        info!("Start creating data source {}", definition.name);
        debug!(
            connection = %sql.redacted_connection_string(),
            container = %definition.container.name,
            "Data source configuration."
        );

        let created = self.client.create_or_update_data_source(&definition).await?;
        info!("Data source {} created", created.name);
        Ok(created)
    }

    pub async fn create_index(
        &self,
        index: &IndexSettings,
        openai: &OpenAiSettings,
    ) -> Result<SearchIndex, ProvisionError> {
        validate_resource_name(&index.name).map_err(ProvisionError::InvalidName)?;
        info!("Start creating index {}", index.name);

        let definition = nobel_index(index, openai);
        if let Some(vector_search) = &definition.vector_search {
            let profiles: Vec<&str> = vector_search.profiles.iter().map(|p| p.name.as_str()).collect();
            let algorithms: Vec<&str> = vector_search
                .algorithms
                .iter()
                .map(VectorSearchAlgorithm::name)
                .collect();
            info!(
                "Created vector search configuration. Profiles: {}, vectorizer: {}, algorithms: {}",
                profiles.join(", "),
                vector_search
                    .vectorizers
                    .first()
                    .map(|v| v.name())
                    .unwrap_or_default(),
                algorithms.join(", ")
            );
        }
        if let Some(semantic) = &definition.semantic_search {
            for configuration in &semantic.configurations {
                info!(
                    "Created semantic search configuration. Semantic search profile: {}",
                    configuration.name
                );
            }
        }

        let created = self.client.create_or_update_index(&definition).await?;
        info!(
            "Index {} created successfully with vector search configuration",
            created.name
        );
        Ok(created)
    }

    pub async fn create_skillset(
        &self,
        index_name: &str,
        openai: &OpenAiSettings,
    ) -> Result<SearchIndexerSkillset, ProvisionError> {
        validate_resource_name(index_name).map_err(ProvisionError::InvalidName)?;
        let definition = nobel_skillset(index_name, openai);
        info!("Start creating skillset {}", definition.name);
        for skill in &definition.skills {
            match skill {
                SearchIndexerSkill::Split(_) => info!(
                    "Defined SplitSkill for text chunking. Context: {}",
                    skill.context().unwrap_or_default()
                ),
                SearchIndexerSkill::AzureOpenAiEmbedding(_) => info!(
                    "Defined EmbeddingSkill for text vectorization. Context: {}",
                    skill.context().unwrap_or_default()
                ),
            }
        }
        info!("Defined IndexProjections for Skillset {}", definition.name);

        let created = self.client.create_or_update_skillset(&definition).await?;
        info!("{} created", created.name);
        Ok(created)
    }

    pub async fn create_indexer(&self, index_name: &str) -> Result<SearchIndexer, ProvisionError> {
        validate_resource_name(index_name).map_err(ProvisionError::InvalidName)?;
        let definition = nobel_indexer(index_name, &self.table);
        validate_resource_name(&definition.name).map_err(ProvisionError::InvalidName)?;
        info!("Start creating indexer {}", definition.name);
        info!(
            "Created indexer configuration for {}. Skillset: {}, Target Index: {}, Data Source: {}",
            definition.name,
            definition.skillset_name.as_deref().unwrap_or_default(),
            definition.target_index_name,
            definition.data_source_name
        );

        let created = self.client.create_or_update_indexer(&definition).await?;
        info!("Indexer {} created", created.name);
        Ok(created)
    }

    pub async fn indexer_status(&self, index_name: &str) -> Result<IndexerStatus, ProvisionError> {
        let name = checked_indexer_name(index_name)?;
        Ok(self.client.indexer_status(&name).await?)
    }

    /// Trigger an indexer run. The returned ticket remembers which run was
    /// last reported beforehand so [`Self::wait_for_indexer`] can skip it.
    /// When a run is already in progress the ticket follows that run instead.
    pub async fn run_indexer(&self, index_name: &str) -> Result<RunTicket, ProvisionError> {
        let name = checked_indexer_name(index_name)?;

        let previous_start = match self.client.indexer_status(&name).await {
            Ok(status) => status.last_result.and_then(|r| r.start_time),
            Err(err) => {
                // A brand new indexer may not report yet; the run itself
                // surfaces real failures.
                debug!(error = %err, "Could not read indexer status before run.");
                None
            }
        };

        info!("Start running indexer {}", name);
        match self.client.run_indexer(&name).await {
            Ok(()) => {
                info!("Indexer {} run requested", name);
                Ok(RunTicket {
                    indexer: name,
                    previous_start,
                    joined_start: None,
                })
            }
            // The service starts a run on its own right after the indexer is
            // created and refuses a second one while it lasts.
            Err(err) if err.status() == Some(409) => {
                info!("Indexer {} is already running, following the current run", name);
                let current = self.client.indexer_status(&name).await?.last_result;
                let joined_start = current
                    .filter(|r| {
                        r.status == IndexerExecutionStatus::InProgress
                            || r.start_time != previous_start
                    })
                    .and_then(|r| r.start_time);
                debug!(indexer = %name, joined_start = ?joined_start, "Joined running indexer.");
                Ok(RunTicket {
                    indexer: name,
                    previous_start,
                    joined_start,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Poll until the run requested by `ticket` finishes.
    pub async fn wait_for_indexer(
        &self,
        ticket: &RunTicket,
        options: WaitOptions,
    ) -> Result<IndexerRunSummary, ProvisionError> {
        let started = Instant::now();
        let deadline = started + options.timeout;

        loop {
            let status = self.client.indexer_status(&ticket.indexer).await?;

            if status.status == IndexerServiceStatus::Error {
                let message = status
                    .last_result
                    .and_then(|r| r.error_message)
                    .unwrap_or_else(|| "indexer is in an error state".to_string());
                return Err(ProvisionError::IndexerFailed {
                    indexer: ticket.indexer.clone(),
                    message,
                });
            }

            let current = status
                .last_result
                .filter(|result| ticket.is_awaited(result));

            if let Some(result) = current {
                debug!(
                    indexer = %ticket.indexer,
                    status = ?result.status,
                    items_processed = result.items_processed,
                    "Indexer run status."
                );
                match result.status {
                    IndexerExecutionStatus::Success => {
                        let summary = IndexerRunSummary::from_result(&ticket.indexer, &result);
                        if summary.items_failed > 0 {
                            warn!(
                                indexer = %ticket.indexer,
                                items_failed = summary.items_failed,
                                "Indexer finished with failed items."
                            );
                        }
                        info!("Running indexer {} is finished", ticket.indexer);
                        return Ok(summary);
                    }
                    IndexerExecutionStatus::TransientFailure => {
                        return Err(ProvisionError::IndexerFailed {
                            indexer: ticket.indexer.clone(),
                            message: failure_message(&result),
                        });
                    }
                    IndexerExecutionStatus::InProgress
                    | IndexerExecutionStatus::Reset
                    | IndexerExecutionStatus::Unknown => {}
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(ProvisionError::Timeout {
                    indexer: ticket.indexer.clone(),
                    waited_secs: now.duration_since(started).as_secs(),
                });
            }
            tokio::time::sleep(options.poll_interval.min(deadline - now)).await;
        }
    }
}

fn checked_indexer_name(index_name: &str) -> Result<String, ProvisionError> {
    validate_resource_name(index_name).map_err(ProvisionError::InvalidName)?;
    let name = indexer_name(index_name);
    validate_resource_name(&name).map_err(ProvisionError::InvalidName)?;
    Ok(name)
}

fn failure_message(result: &IndexerExecutionResult) -> String {
    result
        .error_message
        .clone()
        .or_else(|| result.errors.iter().find_map(|e| e.message.clone()))
        .unwrap_or_else(|| "run failed without an error message".to_string())
}
