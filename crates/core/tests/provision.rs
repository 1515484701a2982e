//! Provisioning steps against a mock search service.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use nobel_search_common::{IndexSettings, OpenAiSettings, Secret, SqlSettings};
use nobel_search_core::{ProvisionError, Provisioner, RunTicket, WaitOptions};
use nobel_search_sdk::SearchServiceClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PATH: &str = "/indexers('nobel-indexer')/search.status";

fn provisioner(server: &MockServer) -> Provisioner {
    let client = SearchServiceClient::new(&server.uri(), "admin-key", "2024-07-01").unwrap();
    Provisioner::new(client, "nobelprizewinners")
}

fn openai() -> OpenAiSettings {
    OpenAiSettings {
        resource_uri: "https://example.openai.azure.com".to_string(),
        api_key: Secret::new("openai-key"),
        deployment_id: "ada".to_string(),
        model_name: "text-embedding-ada-002".to_string(),
        api_type: "azure".to_string(),
    }
}

fn fast_wait() -> WaitOptions {
    WaitOptions {
        poll_interval: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    }
}

fn status_body(run_status: &str, start: impl Into<Value>) -> Value {
    json!({
        "status": "running",
        "lastResult": {
            "status": run_status,
            "errorMessage": null,
            "startTime": start.into(),
            "endTime": "2024-05-01T10:00:07Z",
            "itemsProcessed": 21,
            "itemsFailed": 0,
            "errors": [],
            "warnings": []
        },
        "executionHistory": []
    })
}

async fn mount_status_once(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_index_pushes_vector_and_semantic_config() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/indexes('nobel')"))
        .and(body_partial_json(json!({
            "name": "nobel",
            "vectorSearch": {
                "profiles": [
                    {"name": "vectorsearch-profile", "algorithm": "hnsw-config", "vectorizer": "openai-ada"},
                    {"name": "exhaustiveknn-profile", "algorithm": "exhaustiveknn-config", "vectorizer": "openai-ada"}
                ]
            },
            "semantic": {"configurations": [{"name": "nobel-semantic"}]}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let index = IndexSettings {
        name: "nobel".to_string(),
        embedding_dimensions: 1536,
    };
    let created = provisioner(&server)
        .create_index(&index, &openai())
        .await
        .unwrap();
    assert_eq!(created.name, "nobel");
    assert_eq!(created.fields.len(), 8);
}

#[tokio::test]
async fn test_create_data_source_and_indexer() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/datasources('nobelprizewinners-azuresqlcon')"))
        .and(body_partial_json(json!({
            "type": "azuresql",
            "container": {"name": "nobelprizewinners"}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/indexers('nobel-indexer')"))
        .and(body_partial_json(json!({
            "dataSourceName": "nobelprizewinners-azuresqlcon",
            "skillsetName": "nobel-skillset",
            "targetIndexName": "nobel"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sql = SqlSettings {
        server: "nobel.database.windows.net".to_string(),
        database: "nobel".to_string(),
        username: "loader".to_string(),
        password: Secret::new("pw"),
    };
    let provisioner = provisioner(&server);
    provisioner.create_data_source(&sql).await.unwrap();
    let indexer = provisioner.create_indexer("nobel").await.unwrap();
    assert_eq!(indexer.name, "nobel-indexer");
}

#[tokio::test]
async fn test_create_skillset_targets_index() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/skillsets('nobel-skillset')"))
        .and(body_partial_json(json!({
            "indexProjections": {"selectors": [{"targetIndexName": "nobel", "parentKeyFieldName": "db_table_id"}]}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let skillset = provisioner(&server)
        .create_skillset("nobel", &openai())
        .await
        .unwrap();
    assert_eq!(skillset.skills.len(), 2);
}

#[tokio::test]
async fn test_run_and_wait_skips_previous_run() {
    let server = MockServer::start().await;
    // Read before the run request, then once more before the new run shows up.
    mount_status_once(&server, status_body("success", "2024-04-01T08:00:00Z")).await;
    mount_status_once(&server, status_body("success", "2024-04-01T08:00:00Z")).await;
    mount_status_once(&server, status_body("inProgress", "2024-05-01T10:00:00Z")).await;
    mount_status_once(&server, status_body("success", "2024-05-01T10:00:00Z")).await;
    Mock::given(method("POST"))
        .and(path("/indexers('nobel-indexer')/search.run"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner(&server);
    let ticket = provisioner.run_indexer("nobel").await.unwrap();
    assert_eq!(ticket.indexer, "nobel-indexer");
    assert!(ticket.previous_start.is_some());
    assert_eq!(ticket.joined_start, None);

    let summary = provisioner
        .wait_for_indexer(&ticket, fast_wait())
        .await
        .unwrap();
    assert_eq!(summary.items_processed, 21);
    assert_eq!(summary.items_failed, 0);
    assert_eq!(summary.duration, Some(chrono::Duration::seconds(7)));
}

#[tokio::test]
async fn test_run_conflict_follows_the_run_in_progress() {
    let server = MockServer::start().await;
    // A freshly created indexer is already running when the run request lands.
    mount_status_once(&server, status_body("inProgress", "2024-05-01T10:00:00Z")).await;
    mount_status_once(&server, status_body("inProgress", "2024-05-01T10:00:00Z")).await;
    mount_status_once(&server, status_body("inProgress", "2024-05-01T10:00:00Z")).await;
    mount_status_once(&server, status_body("success", "2024-05-01T10:00:00Z")).await;
    Mock::given(method("POST"))
        .and(path("/indexers('nobel-indexer')/search.run"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {
                "code": "",
                "message": "Another indexer invocation is currently in progress; concurrent invocations are not allowed."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner(&server);
    let ticket = provisioner.run_indexer("nobel").await.unwrap();
    let started: chrono::DateTime<chrono::Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
    assert_eq!(ticket.previous_start, Some(started));
    assert_eq!(ticket.joined_start, Some(started));

    let summary = provisioner
        .wait_for_indexer(&ticket, fast_wait())
        .await
        .unwrap();
    assert_eq!(summary.items_processed, 21);
    assert_eq!(summary.duration, Some(chrono::Duration::seconds(7)));
}

#[tokio::test]
async fn test_run_failure_other_than_conflict_is_an_error() {
    let server = MockServer::start().await;
    mount_status_once(&server, status_body("success", "2024-04-01T08:00:00Z")).await;
    Mock::given(method("POST"))
        .and(path("/indexers('nobel-indexer')/search.run"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = provisioner(&server).run_indexer("nobel").await.unwrap_err();
    assert!(
        matches!(&err, ProvisionError::Search(search) if search.status() == Some(403)),
        "{err}"
    );
}

#[tokio::test]
async fn test_wait_ignores_previous_run_without_start_time() {
    let server = MockServer::start().await;
    // Read before the run request, then once more while the new run is queued.
    mount_status_once(&server, status_body("success", Value::Null)).await;
    mount_status_once(&server, status_body("success", Value::Null)).await;
    mount_status_once(&server, status_body("inProgress", "2024-05-01T10:00:00Z")).await;
    mount_status_once(&server, status_body("success", "2024-05-01T10:00:00Z")).await;
    Mock::given(method("POST"))
        .and(path("/indexers('nobel-indexer')/search.run"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner(&server);
    let ticket = provisioner.run_indexer("nobel").await.unwrap();
    assert_eq!(ticket.previous_start, None);

    let summary = provisioner
        .wait_for_indexer(&ticket, fast_wait())
        .await
        .unwrap();
    assert_eq!(summary.duration, Some(chrono::Duration::seconds(7)));
}

#[tokio::test]
async fn test_wait_fails_when_indexer_is_in_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "lastResult": {
                "status": "inProgress",
                "errorMessage": "Data source 'nobelprizewinners-azuresqlcon' was not found",
                "startTime": "2024-05-01T10:00:00Z",
                "itemsProcessed": 0,
                "itemsFailed": 0,
                "errors": [],
                "warnings": []
            },
            "executionHistory": []
        })))
        .mount(&server)
        .await;

    let ticket = RunTicket {
        indexer: "nobel-indexer".to_string(),
        previous_start: None,
        joined_start: None,
    };
    let err = provisioner(&server)
        .wait_for_indexer(&ticket, fast_wait())
        .await
        .unwrap_err();
    assert!(
        matches!(
            &err,
            ProvisionError::IndexerFailed { indexer, message }
                if indexer == "nobel-indexer" && message.contains("was not found")
        ),
        "{err}"
    );
}

#[tokio::test]
async fn test_wait_reports_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "lastResult": {
                "status": "transientFailure",
                "errorMessage": "Credentials provided in the connection string are invalid",
                "startTime": "2024-05-01T10:00:00Z",
                "itemsProcessed": 0,
                "itemsFailed": 0,
                "errors": [],
                "warnings": []
            },
            "executionHistory": []
        })))
        .mount(&server)
        .await;

    let ticket = RunTicket {
        indexer: "nobel-indexer".to_string(),
        previous_start: None,
        joined_start: None,
    };
    let err = provisioner(&server)
        .wait_for_indexer(&ticket, fast_wait())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ProvisionError::IndexerFailed { message, .. } if message.contains("Credentials")),
        "{err}"
    );
}

#[tokio::test]
async fn test_wait_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_body("inProgress", "2024-05-01T10:00:00Z")),
        )
        .mount(&server)
        .await;

    let ticket = RunTicket {
        indexer: "nobel-indexer".to_string(),
        previous_start: None,
        joined_start: None,
    };
    let options = WaitOptions {
        poll_interval: Duration::from_millis(10),
        timeout: Duration::from_millis(60),
    };
    let err = provisioner(&server)
        .wait_for_indexer(&ticket, options)
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::Timeout { .. }), "{err}");
}

#[tokio::test]
async fn test_invalid_index_name_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let index = IndexSettings {
        name: "Nobel_Index".to_string(),
        embedding_dimensions: 1536,
    };
    let provisioner = provisioner(&server);
    let err = provisioner.create_index(&index, &openai()).await.unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidName(_)));

    let err = provisioner.run_indexer("-nobel").await.unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidName(_)));
}
