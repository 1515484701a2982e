//! Document search requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Full-text query. `None` runs a pure vector query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vector_queries: Vec<VectorQuery>,
    /// Comma separated list of fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<QueryCaptionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<QueryAnswerType>,
}

impl SearchRequest {
    pub fn select_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|field| field.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.select = Some(joined);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryType {
    Simple,
    Full,
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryCaptionType {
    #[serde(rename = "none")]
    Disabled,
    Extractive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryAnswerType {
    #[serde(rename = "none")]
    Disabled,
    Extractive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum VectorQuery {
    /// Text the service vectorizes with the field's vectorizer.
    #[serde(rename = "text")]
    Text(VectorizableTextQuery),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorizableTextQuery {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
    /// Comma separated vector fields to search.
    pub fields: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub value: Vec<SearchResult>,
    #[serde(rename = "@search.answers", default)]
    pub answers: Option<Vec<AnswerResult>>,
    #[serde(rename = "@odata.count", default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "@search.score", default)]
    pub score: f64,
    #[serde(rename = "@search.rerankerScore", default)]
    pub reranker_score: Option<f64>,
    #[serde(rename = "@search.captions", default)]
    pub captions: Option<Vec<CaptionResult>>,
    /// The selected document fields.
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

impl SearchResult {
    /// A field rendered as text: strings as-is, other JSON values in their
    /// JSON form, missing fields and nulls as the empty string.
    pub fn field_text(&self, name: &str) -> String {
        match self.document.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptionResult {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlights: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default)]
    pub score: f64,
}
