//! Skillsets: per-document enrichment steps run by an indexer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerSkillset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub skills: Vec<SearchIndexerSkill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_projections: Option<SearchIndexerIndexProjections>,
    #[serde(rename = "@odata.etag", default, skip_serializing)]
    pub etag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@odata.type")]
pub enum SearchIndexerSkill {
    #[serde(rename = "#Microsoft.Skills.Text.SplitSkill")]
    Split(SplitSkill),
    #[serde(rename = "#Microsoft.Skills.Text.AzureOpenAIEmbeddingSkill")]
    AzureOpenAiEmbedding(AzureOpenAiEmbeddingSkill),
}

impl SearchIndexerSkill {
    pub fn context(&self) -> Option<&str> {
        match self {
            SearchIndexerSkill::Split(skill) => skill.context.as_deref(),
            SearchIndexerSkill::AzureOpenAiEmbedding(skill) => skill.context.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSplitMode {
    Pages,
    Sentences,
}

/// Splits text into chunks ("pages") of bounded length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSkill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_split_mode: Option<TextSplitMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_page_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_overlap_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language_code: Option<String>,
    pub inputs: Vec<InputFieldMappingEntry>,
    pub outputs: Vec<OutputFieldMappingEntry>,
}

/// Calls an Azure OpenAI embedding deployment for each input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureOpenAiEmbeddingSkill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub resource_uri: String,
    pub deployment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    pub inputs: Vec<InputFieldMappingEntry>,
    pub outputs: Vec<OutputFieldMappingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFieldMappingEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl InputFieldMappingEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(source.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFieldMappingEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
}

impl OutputFieldMappingEntry {
    pub fn new(name: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_name: Some(target_name.into()),
        }
    }
}

/// Writes enriched chunks into a secondary index, one document per chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerIndexProjections {
    pub selectors: Vec<SearchIndexerIndexProjectionSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SearchIndexerIndexProjectionsParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerIndexProjectionSelector {
    pub target_index_name: String,
    pub parent_key_field_name: String,
    pub source_context: String,
    pub mappings: Vec<InputFieldMappingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerIndexProjectionsParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_mode: Option<IndexProjectionMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexProjectionMode {
    SkipIndexingParentDocuments,
    IncludeIndexingParentDocuments,
}
