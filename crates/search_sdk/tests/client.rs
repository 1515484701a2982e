//! Client behaviour against a mock search service.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nobel_search_sdk::models::{
    DataSourceCredentials, DataSourceType, IndexerExecutionStatus, QueryType, SearchField,
    SearchIndex, SearchIndexer, SearchIndexerDataContainer, SearchIndexerDataSourceConnection,
    SearchRequest,
};
use nobel_search_sdk::{SearchError, SearchServiceClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_VERSION: &str = "2024-07-01";

fn client(server: &MockServer) -> SearchServiceClient {
    SearchServiceClient::new(&server.uri(), "admin-key", API_VERSION).unwrap()
}

fn sample_index() -> SearchIndex {
    SearchIndex {
        name: "nobel".to_string(),
        fields: vec![SearchField::string("Id").key().analyzer("keyword")],
        vector_search: None,
        semantic_search: None,
        etag: None,
    }
}

#[tokio::test]
async fn test_create_index_sends_put_with_key_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/indexes('nobel')"))
        .and(query_param("api-version", API_VERSION))
        .and(header("api-key", "admin-key"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "name": "nobel",
            "fields": [{"name": "Id", "type": "Edm.String", "key": true, "analyzer": "keyword"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "@odata.etag": "\"0x1\"",
            "name": "nobel",
            "fields": [{"name": "Id", "type": "Edm.String", "key": true, "analyzer": "keyword", "searchable": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_or_update_index(&sample_index())
        .await
        .unwrap();

    assert_eq!(created.name, "nobel");
    assert_eq!(created.etag.as_deref(), Some("\"0x1\""));
}

#[tokio::test]
async fn test_no_content_returns_submitted_definition() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/indexers('nobel-indexer')"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let indexer = SearchIndexer {
        name: "nobel-indexer".to_string(),
        description: None,
        data_source_name: "nobelprizewinners-azuresqlcon".to_string(),
        skillset_name: Some("nobel-skillset".to_string()),
        target_index_name: "nobel".to_string(),
        disabled: None,
        etag: None,
    };
    let result = client(&server)
        .create_or_update_indexer(&indexer)
        .await
        .unwrap();
    assert_eq!(result, indexer);
}

#[tokio::test]
async fn test_data_source_is_created_under_datasources() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/datasources('nobelprizewinners-azuresqlcon')"))
        .and(body_partial_json(json!({
            "type": "azuresql",
            "container": {"name": "nobelprizewinners"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "nobelprizewinners-azuresqlcon",
            "type": "azuresql",
            "credentials": {"connectionString": null},
            "container": {"name": "nobelprizewinners"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data_source = SearchIndexerDataSourceConnection {
        name: "nobelprizewinners-azuresqlcon".to_string(),
        description: None,
        kind: DataSourceType::AzureSql,
        credentials: DataSourceCredentials {
            connection_string: Some("Server=tcp:demo;".to_string()),
        },
        container: SearchIndexerDataContainer {
            name: "nobelprizewinners".to_string(),
            query: None,
        },
        etag: None,
    };
    let created = client(&server)
        .create_or_update_data_source(&data_source)
        .await
        .unwrap();
    assert_eq!(created.credentials.connection_string, None);
}

#[tokio::test]
async fn test_service_errors_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/indexes('nobel')"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": "OperationNotAllowed", "message": "Existing field 'vector' cannot be changed."}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_or_update_index(&sample_index())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(matches!(
        &err,
        SearchError::Api { code: Some(code), .. } if code == "OperationNotAllowed"
    ));
    assert!(err.to_string().contains("Existing field 'vector' cannot be changed."));
}

#[tokio::test]
async fn test_run_indexer_and_read_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexers('nobel-indexer')/search.run"))
        .and(header("api-key", "admin-key"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexers('nobel-indexer')/search.status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "lastResult": {"status": "inProgress", "startTime": "2024-05-01T10:00:00Z", "itemsProcessed": 0, "itemsFailed": 0},
            "executionHistory": []
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    client.run_indexer("nobel-indexer").await.unwrap();
    let status = client.indexer_status("nobel-indexer").await.unwrap();
    assert_eq!(
        status.last_result.unwrap().status,
        IndexerExecutionStatus::InProgress
    );
}

#[tokio::test]
async fn test_search_posts_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes('nobel')/docs/search.post.search"))
        .and(body_partial_json(json!({"search": "physics", "queryType": "semantic", "top": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"@search.score": 1.0, "db_table_year": "1921", "db_table_winner": "Albert Einstein"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest {
        search: Some("physics".to_string()),
        top: Some(2),
        query_type: Some(QueryType::Semantic),
        ..SearchRequest::default()
    };
    let response = client(&server).search("nobel", &request).await.unwrap();
    assert_eq!(response.value.len(), 1);
    assert_eq!(response.value[0].field_text("db_table_winner"), "Albert Einstein");
    assert!(response.answers.is_none());
}

#[tokio::test]
async fn test_invalid_names_never_reach_the_service() {
    let server = MockServer::start().await;
    let err = client(&server).run_indexer("bad'name").await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidName(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    let client = SearchServiceClient::new("http://127.0.0.1:9", "k", API_VERSION).unwrap();
    let err = client.indexer_status("nobel-indexer").await.unwrap_err();
    assert!(matches!(err, SearchError::Http { .. }));
}
