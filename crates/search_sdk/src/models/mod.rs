//! Wire models for the search service REST API.
//!
//! Field names follow the service's camelCase JSON. Optional settings are
//! skipped when unset so the service applies its own defaults.

pub mod data_source;
pub mod index;
pub mod indexer;
pub mod query;
pub mod skillset;

pub use data_source::{
    DataSourceCredentials, DataSourceType, SearchIndexerDataContainer,
    SearchIndexerDataSourceConnection,
};
pub use index::{
    AzureOpenAiParameters, AzureOpenAiVectorizer, ExhaustiveKnnAlgorithmConfiguration,
    ExhaustiveKnnParameters, HnswAlgorithmConfiguration, HnswParameters, SearchField,
    SearchFieldDataType, SearchIndex, SemanticConfiguration, SemanticField,
    SemanticPrioritizedFields, SemanticSearch, VectorSearch, VectorSearchAlgorithm,
    VectorSearchAlgorithmMetric, VectorSearchProfile, VectorSearchVectorizer,
};
pub use indexer::{
    IndexerExecutionResult, IndexerExecutionStatus, IndexerIssue, IndexerServiceStatus,
    IndexerStatus, SearchIndexer,
};
pub use query::{
    AnswerResult, CaptionResult, QueryAnswerType, QueryCaptionType, QueryType, SearchRequest,
    SearchResponse, SearchResult, VectorQuery, VectorizableTextQuery,
};
pub use skillset::{
    AzureOpenAiEmbeddingSkill, IndexProjectionMode, InputFieldMappingEntry,
    OutputFieldMappingEntry, SearchIndexerIndexProjectionSelector,
    SearchIndexerIndexProjections, SearchIndexerIndexProjectionsParameters, SearchIndexerSkill,
    SearchIndexerSkillset, SplitSkill, TextSplitMode,
};
