use nobel_search_common::{SqlSettings, data_source_name};
use nobel_search_sdk::models::{
    DataSourceCredentials, DataSourceType, SearchIndexerDataContainer,
    SearchIndexerDataSourceConnection,
};

/// Azure SQL connection that exposes `table` to the indexer.
pub fn nobel_data_source(table: &str, sql: &SqlSettings) -> SearchIndexerDataSourceConnection {
    SearchIndexerDataSourceConnection {
        name: data_source_name(table),
        description: None,
        kind: DataSourceType::AzureSql,
        credentials: DataSourceCredentials {
            connection_string: Some(sql.connection_string()),
        },
        container: SearchIndexerDataContainer {
            name: table.to_string(),
            query: None,
        },
        etag: None,
    }
}
