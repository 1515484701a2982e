//! Resource definitions pushed to the search service.
//!
//! Field and configuration names are shared by the index, the skillset's
//! projections and the query console, so they live here once.

mod data_source;
mod index;
mod indexer;
mod skillset;

pub use data_source::nobel_data_source;
pub use index::nobel_index;
pub use indexer::{INDEXER_DESCRIPTION, nobel_indexer};
pub use skillset::nobel_skillset;

pub const KEY_FIELD: &str = "Id";
pub const CHUNK_FIELD: &str = "chunk";
pub const VECTOR_FIELD: &str = "vector";
pub const PARENT_ID_FIELD: &str = "db_table_id";
pub const YEAR_FIELD: &str = "db_table_year";
pub const DISCIPLINE_FIELD: &str = "db_table_discipline";
pub const WINNER_FIELD: &str = "db_table_winner";
pub const DESCRIPTION_FIELD: &str = "db_table_description";

/// Fields returned by every console query.
pub const SELECT_FIELDS: [&str; 7] = [
    KEY_FIELD,
    CHUNK_FIELD,
    PARENT_ID_FIELD,
    YEAR_FIELD,
    DISCIPLINE_FIELD,
    WINNER_FIELD,
    DESCRIPTION_FIELD,
];

pub const HNSW_PROFILE: &str = "vectorsearch-profile";
pub const EXHAUSTIVE_KNN_PROFILE: &str = "exhaustiveknn-profile";
pub const HNSW_CONFIG: &str = "hnsw-config";
pub const EXHAUSTIVE_KNN_CONFIG: &str = "exhaustiveknn-config";
pub const VECTORIZER_NAME: &str = "openai-ada";
