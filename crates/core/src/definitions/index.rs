use nobel_search_common::{IndexSettings, OpenAiSettings, semantic_config_name};
use nobel_search_sdk::models::{
    AzureOpenAiParameters, AzureOpenAiVectorizer, ExhaustiveKnnAlgorithmConfiguration,
    ExhaustiveKnnParameters, HnswAlgorithmConfiguration, HnswParameters, SearchField, SearchIndex,
    SemanticConfiguration, SemanticField, SemanticPrioritizedFields, SemanticSearch,
    VectorSearch, VectorSearchAlgorithm, VectorSearchAlgorithmMetric, VectorSearchProfile,
    VectorSearchVectorizer,
};

use super::{
    CHUNK_FIELD, DESCRIPTION_FIELD, DISCIPLINE_FIELD, EXHAUSTIVE_KNN_CONFIG,
    EXHAUSTIVE_KNN_PROFILE, HNSW_CONFIG, HNSW_PROFILE, KEY_FIELD, PARENT_ID_FIELD,
    VECTOR_FIELD, VECTORIZER_NAME, WINNER_FIELD, YEAR_FIELD,
};

/// The chunk index: one document per text chunk, carrying the parent row's
/// columns and the chunk embedding.
pub fn nobel_index(index: &IndexSettings, openai: &OpenAiSettings) -> SearchIndex {
    let table_field = |name: &str| {
        SearchField::string(name)
            .sortable(true)
            .filterable(true)
            .facetable(true)
    };

    let fields = vec![
        SearchField::string(KEY_FIELD)
            .key()
            .sortable(true)
            .filterable(true)
            .facetable(true)
            .analyzer("keyword"),
        SearchField::string(CHUNK_FIELD)
            .sortable(false)
            .filterable(false)
            .facetable(false),
        SearchField::vector(VECTOR_FIELD, index.embedding_dimensions, HNSW_PROFILE),
        table_field(PARENT_ID_FIELD),
        table_field(YEAR_FIELD),
        table_field(DISCIPLINE_FIELD),
        table_field(WINNER_FIELD),
        table_field(DESCRIPTION_FIELD),
    ];

    SearchIndex {
        name: index.name.clone(),
        fields,
        vector_search: Some(vector_search(openai)),
        semantic_search: Some(semantic_search(&index.name)),
        etag: None,
    }
}

fn vector_search(openai: &OpenAiSettings) -> VectorSearch {
    VectorSearch {
        profiles: vec![
            VectorSearchProfile {
                name: HNSW_PROFILE.to_string(),
                algorithm: HNSW_CONFIG.to_string(),
                vectorizer: Some(VECTORIZER_NAME.to_string()),
            },
            VectorSearchProfile {
                name: EXHAUSTIVE_KNN_PROFILE.to_string(),
                algorithm: EXHAUSTIVE_KNN_CONFIG.to_string(),
                vectorizer: Some(VECTORIZER_NAME.to_string()),
            },
        ],
        algorithms: vec![
            VectorSearchAlgorithm::Hnsw(HnswAlgorithmConfiguration {
                name: HNSW_CONFIG.to_string(),
                hnsw_parameters: Some(HnswParameters {
                    m: 4,
                    ef_construction: 400,
                    ef_search: 500,
                    metric: VectorSearchAlgorithmMetric::Cosine,
                }),
            }),
            VectorSearchAlgorithm::ExhaustiveKnn(ExhaustiveKnnAlgorithmConfiguration {
                name: EXHAUSTIVE_KNN_CONFIG.to_string(),
                exhaustive_knn_parameters: Some(ExhaustiveKnnParameters {
                    metric: VectorSearchAlgorithmMetric::Cosine,
                }),
            }),
        ],
        vectorizers: vec![VectorSearchVectorizer::AzureOpenAi(AzureOpenAiVectorizer {
            name: VECTORIZER_NAME.to_string(),
            parameters: AzureOpenAiParameters {
                resource_uri: openai.resource_uri.clone(),
                deployment_id: openai.deployment_id.clone(),
                api_key: Some(openai.api_key.expose().to_string()),
                model_name: Some(openai.model_name.clone()),
            },
        })],
    }
}

fn semantic_search(index_name: &str) -> SemanticSearch {
    let name = semantic_config_name(index_name);
    SemanticSearch {
        default_configuration: Some(name.clone()),
        configurations: vec![SemanticConfiguration {
            name,
            prioritized_fields: SemanticPrioritizedFields {
                title_field: None,
                prioritized_content_fields: vec![SemanticField::new(CHUNK_FIELD)],
                prioritized_keywords_fields: Vec::new(),
            },
        }],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nobel_search_common::Secret;
    use nobel_search_sdk::models::SearchFieldDataType;

    fn settings() -> (IndexSettings, OpenAiSettings) {
        (
            IndexSettings {
                name: "nobel".to_string(),
                embedding_dimensions: 1536,
            },
            OpenAiSettings {
                resource_uri: "https://example.openai.azure.com".to_string(),
                api_key: Secret::new("openai-key"),
                deployment_id: "ada".to_string(),
                model_name: "text-embedding-ada-002".to_string(),
                api_type: "azure".to_string(),
            },
        )
    }

    #[test]
    fn test_index_fields() {
        let (index, openai) = settings();
        let definition = nobel_index(&index, &openai);

        assert_eq!(definition.name, "nobel");
        let names: Vec<&str> = definition.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Id",
                "chunk",
                "vector",
                "db_table_id",
                "db_table_year",
                "db_table_discipline",
                "db_table_winner",
                "db_table_description"
            ]
        );

        let key = definition.key_field().unwrap();
        assert_eq!(key.name, "Id");
        assert_eq!(key.analyzer.as_deref(), Some("keyword"));

        let chunk = definition.field("chunk").unwrap();
        assert_eq!(chunk.sortable, Some(false));
        assert_eq!(chunk.filterable, Some(false));

        let vector = definition.field("vector").unwrap();
        assert_eq!(
            vector.data_type,
            SearchFieldDataType::collection(SearchFieldDataType::Single)
        );
        assert_eq!(vector.dimensions, Some(1536));
        assert_eq!(vector.vector_search_profile.as_deref(), Some("vectorsearch-profile"));

        let winner = definition.field("db_table_winner").unwrap();
        assert_eq!(winner.facetable, Some(true));
    }

    #[test]
    fn test_vector_search_profiles_resolve() {
        let (index, openai) = settings();
        let vector_search = nobel_index(&index, &openai).vector_search.unwrap();

        for profile in &vector_search.profiles {
            assert!(
                vector_search
                    .algorithms
                    .iter()
                    .any(|a| a.name() == profile.algorithm),
                "profile {} points at a missing algorithm",
                profile.name
            );
            assert_eq!(profile.vectorizer.as_deref(), Some("openai-ada"));
        }
        assert_eq!(
            vector_search.profile("exhaustiveknn-profile").unwrap().algorithm,
            "exhaustiveknn-config"
        );

        match &vector_search.algorithms[0] {
            VectorSearchAlgorithm::Hnsw(config) => {
                let params = config.hnsw_parameters.as_ref().unwrap();
                assert_eq!((params.m, params.ef_construction, params.ef_search), (4, 400, 500));
                assert_eq!(params.metric, VectorSearchAlgorithmMetric::Cosine);
            }
            other => unreachable!("unexpected first algorithm {other:?}"),
        }
    }

    #[test]
    fn test_semantic_configuration_named_after_index() {
        let (index, openai) = settings();
        let semantic = nobel_index(&index, &openai).semantic_search.unwrap();
        assert_eq!(semantic.default_configuration.as_deref(), Some("nobel-semantic"));
        assert_eq!(semantic.configurations[0].name, "nobel-semantic");
        assert_eq!(
            semantic.configurations[0].prioritized_fields.prioritized_content_fields,
            vec![SemanticField::new("chunk")]
        );
    }

    #[test]
    fn test_custom_dimensions_flow_into_vector_field() {
        let (mut index, openai) = settings();
        index.embedding_dimensions = 3072;
        let definition = nobel_index(&index, &openai);
        assert_eq!(definition.field("vector").unwrap().dimensions, Some(3072));
    }
}
