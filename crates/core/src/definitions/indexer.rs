use nobel_search_common::{data_source_name, indexer_name, skillset_name};
use nobel_search_sdk::models::SearchIndexer;

pub const INDEXER_DESCRIPTION: &str =
    "Indexer to index data from Azure SQL DB, chunk text and vectorize it";

/// Wires the table's data source through the index's skillset into the index.
pub fn nobel_indexer(index_name: &str, table: &str) -> SearchIndexer {
    SearchIndexer {
        name: indexer_name(index_name),
        description: Some(INDEXER_DESCRIPTION.to_string()),
        data_source_name: data_source_name(table),
        skillset_name: Some(skillset_name(index_name)),
        target_index_name: index_name.to_string(),
        disabled: None,
        etag: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexer_wiring() {
        let indexer = nobel_indexer("nobel", "nobelprizewinners");
        assert_eq!(indexer.name, "nobel-indexer");
        assert_eq!(indexer.data_source_name, "nobelprizewinners-azuresqlcon");
        assert_eq!(indexer.skillset_name.as_deref(), Some("nobel-skillset"));
        assert_eq!(indexer.target_index_name, "nobel");
        assert_eq!(indexer.description.as_deref(), Some(INDEXER_DESCRIPTION));
    }
}
