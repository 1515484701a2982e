//! Names of the search resources.
//!
//! Everything hangs off two names: the SQL table that feeds the data source
//! and the index the user picks. The skillset, indexer and semantic
//! configuration are suffixed variants of the index name.

/// SQL table holding the Nobel Prize winners.
pub const DEFAULT_TABLE_NAME: &str = "nobelprizewinners";

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 128;

pub fn data_source_name(table_name: &str) -> String {
    format!("{table_name}-azuresqlcon")
}

pub fn skillset_name(index_name: &str) -> String {
    format!("{index_name}-skillset")
}

pub fn indexer_name(index_name: &str) -> String {
    format!("{index_name}-indexer")
}

pub fn semantic_config_name(index_name: &str) -> String {
    format!("{index_name}-semantic")
}

/// Check a name against the rules the search service applies to indexes,
/// indexers, skillsets and data sources.
pub fn validate_resource_name(name: &str) -> Result<(), String> {
    if name.len() < MIN_NAME_LEN || name.len() > MAX_NAME_LEN {
        return Err(format!(
            "Invalid resource name '{name}': must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
        ));
    }
    if let Some(ch) = name
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-'))
    {
        return Err(format!(
            "Invalid resource name '{name}': character '{ch}' is not allowed, use lowercase letters, digits or '-'"
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(format!(
            "Invalid resource name '{name}': must not start or end with '-'"
        ));
    }
    if name.contains("--") {
        return Err(format!(
            "Invalid resource name '{name}': must not contain consecutive dashes"
        ));
    }
    Ok(())
}
