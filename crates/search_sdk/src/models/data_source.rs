use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerDataSourceConnection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: DataSourceType,
    pub credentials: DataSourceCredentials,
    pub container: SearchIndexerDataContainer,
    #[serde(rename = "@odata.etag", default, skip_serializing)]
    pub etag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    AzureSql,
    CosmosDb,
    AzureBlob,
    AzureTable,
    MySql,
    AdlsGen2,
}

/// The service never echoes the connection string back; responses carry
/// `null` here.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceCredentials {
    #[serde(default)]
    pub connection_string: Option<String>,
}

impl std::fmt::Debug for DataSourceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceCredentials")
            .field(
                "connection_string",
                &self.connection_string.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexerDataContainer {
    /// Table, view, collection or blob container to read from.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_source_wire_format() {
        let data_source = SearchIndexerDataSourceConnection {
            name: "nobelprizewinners-azuresqlcon".to_string(),
            description: None,
            kind: DataSourceType::AzureSql,
            credentials: DataSourceCredentials {
                connection_string: Some("Server=tcp:demo;Password=pw;".to_string()),
            },
            container: SearchIndexerDataContainer {
                name: "nobelprizewinners".to_string(),
                query: None,
            },
            etag: None,
        };

        assert_eq!(
            serde_json::to_value(&data_source).unwrap(),
            json!({
                "name": "nobelprizewinners-azuresqlcon",
                "type": "azuresql",
                "credentials": {"connectionString": "Server=tcp:demo;Password=pw;"},
                "container": {"name": "nobelprizewinners"}
            })
        );
        assert!(!format!("{data_source:?}").contains("pw"));
    }

    #[test]
    fn test_credentials_come_back_null() {
        let data_source: SearchIndexerDataSourceConnection = serde_json::from_value(json!({
            "name": "nobelprizewinners-azuresqlcon",
            "type": "azuresql",
            "credentials": {"connectionString": null},
            "container": {"name": "nobelprizewinners", "query": null}
        }))
        .unwrap();
        assert_eq!(data_source.credentials.connection_string, None);
        assert_eq!(data_source.kind, DataSourceType::AzureSql);
    }
}
