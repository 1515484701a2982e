use nobel_search_common::{OpenAiSettings, skillset_name};
use nobel_search_sdk::models::{
    AzureOpenAiEmbeddingSkill, InputFieldMappingEntry, OutputFieldMappingEntry,
    SearchIndexerIndexProjectionSelector, SearchIndexerIndexProjections, SearchIndexerSkill,
    SearchIndexerSkillset, SplitSkill, TextSplitMode,
};

use super::{
    CHUNK_FIELD, DESCRIPTION_FIELD, DISCIPLINE_FIELD, PARENT_ID_FIELD, VECTOR_FIELD, WINNER_FIELD,
    YEAR_FIELD,
};

const PAGES_CONTEXT: &str = "/document/pages/*";
const MAXIMUM_PAGE_LENGTH: u32 = 300;
const PAGE_OVERLAP_LENGTH: u32 = 20;

/// Chunk each row's description into pages, embed every page and project
/// the pages into `index_name`, one search document per page.
pub fn nobel_skillset(index_name: &str, openai: &OpenAiSettings) -> SearchIndexerSkillset {
    let split = SplitSkill {
        name: None,
        description: Some("Split skill to chunk documents".to_string()),
        context: Some("/document".to_string()),
        text_split_mode: Some(TextSplitMode::Pages),
        maximum_page_length: Some(MAXIMUM_PAGE_LENGTH),
        page_overlap_length: Some(PAGE_OVERLAP_LENGTH),
        default_language_code: None,
        inputs: vec![InputFieldMappingEntry::new("text", "/document/Description")],
        outputs: vec![OutputFieldMappingEntry::new("textItems", "pages")],
    };

    let embedding = AzureOpenAiEmbeddingSkill {
        name: None,
        description: Some("Skill to generate embeddings via Azure OpenAI".to_string()),
        context: Some(PAGES_CONTEXT.to_string()),
        resource_uri: openai.resource_uri.clone(),
        deployment_id: openai.deployment_id.clone(),
        api_key: Some(openai.api_key.expose().to_string()),
        model_name: Some(openai.model_name.clone()),
        // ada-002 has a fixed output size and rejects the parameter.
        dimensions: None,
        inputs: vec![InputFieldMappingEntry::new("text", PAGES_CONTEXT)],
        outputs: vec![OutputFieldMappingEntry::new("embedding", VECTOR_FIELD)],
    };

    let projections = SearchIndexerIndexProjections {
        selectors: vec![SearchIndexerIndexProjectionSelector {
            target_index_name: index_name.to_string(),
            parent_key_field_name: PARENT_ID_FIELD.to_string(),
            source_context: PAGES_CONTEXT.to_string(),
            mappings: vec![
                InputFieldMappingEntry::new(CHUNK_FIELD, PAGES_CONTEXT),
                InputFieldMappingEntry::new(VECTOR_FIELD, "/document/pages/*/vector"),
                InputFieldMappingEntry::new(YEAR_FIELD, "/document/Year"),
                InputFieldMappingEntry::new(DISCIPLINE_FIELD, "/document/Discipline"),
                InputFieldMappingEntry::new(WINNER_FIELD, "/document/Winner"),
                InputFieldMappingEntry::new(DESCRIPTION_FIELD, "/document/Description"),
            ],
        }],
        parameters: None,
    };

    SearchIndexerSkillset {
        name: skillset_name(index_name),
        description: Some("Skillset for Azure AI Search with Azure OpenAI Embedding".to_string()),
        skills: vec![
            SearchIndexerSkill::Split(split),
            SearchIndexerSkill::AzureOpenAiEmbedding(embedding),
        ],
        index_projections: Some(projections),
        etag: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nobel_search_common::Secret;

    fn openai() -> OpenAiSettings {
        OpenAiSettings {
            resource_uri: "https://example.openai.azure.com".to_string(),
            api_key: Secret::new("openai-key"),
            deployment_id: "ada".to_string(),
            model_name: "text-embedding-ada-002".to_string(),
            api_type: "azure".to_string(),
        }
    }

    #[test]
    fn test_skillset_chunks_then_embeds() {
        let skillset = nobel_skillset("nobel", &openai());
        assert_eq!(skillset.name, "nobel-skillset");
        assert_eq!(skillset.skills.len(), 2);

        let SearchIndexerSkill::Split(split) = &skillset.skills[0] else {
            unreachable!("first skill should split text");
        };
        assert_eq!(split.context.as_deref(), Some("/document"));
        assert_eq!(split.text_split_mode, Some(TextSplitMode::Pages));
        assert_eq!(split.maximum_page_length, Some(300));
        assert_eq!(split.page_overlap_length, Some(20));
        assert_eq!(split.inputs[0].source.as_deref(), Some("/document/Description"));
        assert_eq!(split.outputs[0].target_name.as_deref(), Some("pages"));

        let SearchIndexerSkill::AzureOpenAiEmbedding(embedding) = &skillset.skills[1] else {
            unreachable!("second skill should embed pages");
        };
        assert_eq!(skillset.skills[1].context(), Some("/document/pages/*"));
        assert_eq!(embedding.deployment_id, "ada");
        assert_eq!(embedding.api_key.as_deref(), Some("openai-key"));
        assert_eq!(embedding.outputs[0].name, "embedding");
        assert_eq!(embedding.outputs[0].target_name.as_deref(), Some("vector"));
    }

    #[test]
    fn test_projection_targets_index() {
        let skillset = nobel_skillset("nobel", &openai());
        let projections = skillset.index_projections.unwrap();
        let selector = &projections.selectors[0];

        assert_eq!(selector.target_index_name, "nobel");
        assert_eq!(selector.parent_key_field_name, "db_table_id");
        assert_eq!(selector.source_context, "/document/pages/*");

        let mapping = |name: &str| {
            selector
                .mappings
                .iter()
                .find(|m| m.name == name)
                .and_then(|m| m.source.clone())
        };
        assert_eq!(mapping("chunk").as_deref(), Some("/document/pages/*"));
        assert_eq!(mapping("vector").as_deref(), Some("/document/pages/*/vector"));
        assert_eq!(mapping("db_table_year").as_deref(), Some("/document/Year"));
        assert_eq!(mapping("db_table_winner").as_deref(), Some("/document/Winner"));
        assert_eq!(selector.mappings.len(), 6);
    }
}
