//! Index definition: fields, vector search and semantic configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub name: String,
    pub fields: Vec<SearchField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_search: Option<VectorSearch>,
    #[serde(rename = "semantic", default, skip_serializing_if = "Option::is_none")]
    pub semantic_search: Option<SemanticSearch>,
    #[serde(rename = "@odata.etag", default, skip_serializing)]
    pub etag: Option<String>,
}

impl SearchIndex {
    pub fn field(&self, name: &str) -> Option<&SearchField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn key_field(&self) -> Option<&SearchField> {
        self.fields.iter().find(|field| field.key == Some(true))
    }
}

/// Entity data model type of a field, e.g. `Edm.String` or
/// `Collection(Edm.Single)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SearchFieldDataType {
    String,
    Int32,
    Int64,
    Double,
    Boolean,
    DateTimeOffset,
    Single,
    Collection(Box<SearchFieldDataType>),
    /// Types this client does not model (geography, complex types, ...).
    Other(String),
}

impl SearchFieldDataType {
    pub fn collection(inner: SearchFieldDataType) -> Self {
        SearchFieldDataType::Collection(Box::new(inner))
    }
}

impl fmt::Display for SearchFieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFieldDataType::String => f.write_str("Edm.String"),
            SearchFieldDataType::Int32 => f.write_str("Edm.Int32"),
            SearchFieldDataType::Int64 => f.write_str("Edm.Int64"),
            SearchFieldDataType::Double => f.write_str("Edm.Double"),
            SearchFieldDataType::Boolean => f.write_str("Edm.Boolean"),
            SearchFieldDataType::DateTimeOffset => f.write_str("Edm.DateTimeOffset"),
            SearchFieldDataType::Single => f.write_str("Edm.Single"),
            SearchFieldDataType::Collection(inner) => write!(f, "Collection({inner})"),
            SearchFieldDataType::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<SearchFieldDataType> for String {
    fn from(value: SearchFieldDataType) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SearchFieldDataType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(inner) = value
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let inner = SearchFieldDataType::try_from(inner.to_string())?;
            return Ok(SearchFieldDataType::collection(inner));
        }

        Ok(match value.as_str() {
            "Edm.String" => SearchFieldDataType::String,
            "Edm.Int32" => SearchFieldDataType::Int32,
            "Edm.Int64" => SearchFieldDataType::Int64,
            "Edm.Double" => SearchFieldDataType::Double,
            "Edm.Boolean" => SearchFieldDataType::Boolean,
            "Edm.DateTimeOffset" => SearchFieldDataType::DateTimeOffset,
            "Edm.Single" => SearchFieldDataType::Single,
            "" => return Err("empty field type".to_string()),
            _ => SearchFieldDataType::Other(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: SearchFieldDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrievable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facetable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_search_profile: Option<String>,
}

impl SearchField {
    pub fn new(name: impl Into<String>, data_type: SearchFieldDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            key: None,
            retrievable: None,
            searchable: None,
            filterable: None,
            sortable: None,
            facetable: None,
            analyzer: None,
            dimensions: None,
            vector_search_profile: None,
        }
    }

    /// Searchable `Edm.String` field.
    pub fn string(name: impl Into<String>) -> Self {
        let mut field = Self::new(name, SearchFieldDataType::String);
        field.searchable = Some(true);
        field
    }

    /// `Collection(Edm.Single)` field holding embeddings.
    pub fn vector(name: impl Into<String>, dimensions: u32, profile: impl Into<String>) -> Self {
        let mut field = Self::new(
            name,
            SearchFieldDataType::collection(SearchFieldDataType::Single),
        );
        field.searchable = Some(true);
        field.dimensions = Some(dimensions);
        field.vector_search_profile = Some(profile.into());
        field
    }

    pub fn key(mut self) -> Self {
        self.key = Some(true);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn sortable(mut self, value: bool) -> Self {
        self.sortable = Some(value);
        self
    }

    pub fn filterable(mut self, value: bool) -> Self {
        self.filterable = Some(value);
        self
    }

    pub fn facetable(mut self, value: bool) -> Self {
        self.facetable = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearch {
    #[serde(default)]
    pub profiles: Vec<VectorSearchProfile>,
    #[serde(default)]
    pub algorithms: Vec<VectorSearchAlgorithm>,
    #[serde(default)]
    pub vectorizers: Vec<VectorSearchVectorizer>,
}

impl VectorSearch {
    pub fn profile(&self, name: &str) -> Option<&VectorSearchProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearchProfile {
    pub name: String,
    /// Name of the algorithm configuration this profile uses.
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorizer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VectorSearchAlgorithm {
    #[serde(rename = "hnsw")]
    Hnsw(HnswAlgorithmConfiguration),
    #[serde(rename = "exhaustiveKnn")]
    ExhaustiveKnn(ExhaustiveKnnAlgorithmConfiguration),
}

impl VectorSearchAlgorithm {
    pub fn name(&self) -> &str {
        match self {
            VectorSearchAlgorithm::Hnsw(config) => &config.name,
            VectorSearchAlgorithm::ExhaustiveKnn(config) => &config.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HnswAlgorithmConfiguration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hnsw_parameters: Option<HnswParameters>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HnswParameters {
    pub m: u32,
    pub ef_construction: u32,
    pub ef_search: u32,
    pub metric: VectorSearchAlgorithmMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhaustiveKnnAlgorithmConfiguration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaustive_knn_parameters: Option<ExhaustiveKnnParameters>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhaustiveKnnParameters {
    pub metric: VectorSearchAlgorithmMetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VectorSearchAlgorithmMetric {
    Cosine,
    Euclidean,
    DotProduct,
    Hamming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VectorSearchVectorizer {
    #[serde(rename = "azureOpenAI")]
    AzureOpenAi(AzureOpenAiVectorizer),
}

impl VectorSearchVectorizer {
    pub fn name(&self) -> &str {
        match self {
            VectorSearchVectorizer::AzureOpenAi(vectorizer) => &vectorizer.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureOpenAiVectorizer {
    pub name: String,
    #[serde(rename = "azureOpenAIParameters")]
    pub parameters: AzureOpenAiParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureOpenAiParameters {
    pub resource_uri: String,
    pub deployment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,
    pub configurations: Vec<SemanticConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticConfiguration {
    pub name: String,
    pub prioritized_fields: SemanticPrioritizedFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticPrioritizedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<SemanticField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prioritized_content_fields: Vec<SemanticField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prioritized_keywords_fields: Vec<SemanticField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticField {
    pub field_name: String,
}

impl SemanticField {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}
