//! Sample queries against the chunk index.

use std::fmt;

use nobel_search_common::semantic_config_name;
use nobel_search_sdk::models::{
    QueryAnswerType, QueryCaptionType, QueryType, SearchRequest, SearchResponse, VectorQuery,
    VectorizableTextQuery,
};

use crate::definitions::{DESCRIPTION_FIELD, SELECT_FIELDS, VECTOR_FIELD, WINNER_FIELD, YEAR_FIELD};

pub const EXIT_COMMAND: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Nearest neighbours of the query embedding only.
    Vector,
    /// Keyword search fused with the vector query.
    #[default]
    Hybrid,
    /// Hybrid plus semantic reranking, captions and answers.
    Semantic,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMode::Vector => "vector",
            SearchMode::Hybrid => "hybrid",
            SearchMode::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Documents returned.
    pub top: u32,
    /// Nearest neighbours requested from the vector query.
    pub k: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { top: 2, k: 2 }
    }
}

pub fn build_request(
    mode: SearchMode,
    text: &str,
    index_name: &str,
    options: QueryOptions,
) -> SearchRequest {
    let vector_query = VectorQuery::Text(VectorizableTextQuery {
        text: text.to_string(),
        k: Some(options.k),
        fields: VECTOR_FIELD.to_string(),
        exhaustive: Some(true),
    });

    let request = SearchRequest {
        vector_queries: vec![vector_query],
        top: Some(options.top),
        ..SearchRequest::default()
    }
    .select_fields(SELECT_FIELDS);

    match mode {
        SearchMode::Vector => request,
        SearchMode::Hybrid => SearchRequest {
            search: Some(text.to_string()),
            ..request
        },
        SearchMode::Semantic => SearchRequest {
            search: Some(text.to_string()),
            query_type: Some(QueryType::Semantic),
            semantic_configuration: Some(semantic_config_name(index_name)),
            captions: Some(QueryCaptionType::Extractive),
            answers: Some(QueryAnswerType::Extractive),
            ..request
        },
    }
}

/// Console lines for a response: semantic answers first, then one line per
/// hit followed by its first caption when the service returned one.
pub fn render_response(response: &SearchResponse) -> Vec<String> {
    let mut lines = Vec::new();

    for answer in response.answers.iter().flatten() {
        match (&answer.highlights, &answer.text) {
            (Some(highlights), _) if !highlights.is_empty() => {
                lines.push(format!("Semantic search result (highlight): {highlights}"));
            }
            (_, text) => {
                lines.push(format!(
                    "Semantic search result: {}",
                    text.as_deref().unwrap_or_default()
                ));
            }
        }
        lines.push(format!("Semantic results score: {}", answer.score));
    }

    for hit in &response.value {
        lines.push(format!(
            "Nobel prize result: {} {} description: {}",
            hit.field_text(YEAR_FIELD),
            hit.field_text(WINNER_FIELD),
            hit.field_text(DESCRIPTION_FIELD)
        ));
        if let Some(caption) = hit.captions.iter().flatten().next() {
            let shown = caption
                .highlights
                .as_deref()
                .filter(|h| !h.is_empty())
                .or(caption.text.as_deref())
                .unwrap_or_default();
            lines.push(format!("Caption: {shown}"));
        }
    }

    lines
}

pub fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}
