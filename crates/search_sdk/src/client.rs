//! HTTP client for the search service management and query APIs.

use std::fmt;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{SearchError, api_error};
use crate::models::{
    IndexerStatus, SearchIndex, SearchIndexer, SearchIndexerDataSourceConnection,
    SearchIndexerSkillset, SearchRequest, SearchResponse,
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const API_KEY_HEADER: &str = "api-key";

const INDEXES: &str = "indexes";
const SKILLSETS: &str = "skillsets";
const DATA_SOURCES: &str = "datasources";
const INDEXERS: &str = "indexers";

/// Client bound to one search service, authenticated with an admin key.
#[derive(Clone)]
pub struct SearchServiceClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    api_version: String,
}

impl fmt::Debug for SearchServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchServiceClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SearchServiceClient {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|err| {
                warn!(error = %err, "Failed to build search HTTP client.");
                SearchError::Client(err)
            })?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
            api_version: api_version.into(),
        })
    }

    /// Build `{endpoint}/{segments...}?api-version=...`.
    fn url(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SearchError::InvalidEndpoint {
                    endpoint: self.endpoint.to_string(),
                    reason: "URL cannot be a base".to_string(),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.http
            .request(method, url.clone())
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Send a request and return the status and raw body, mapping non-2xx
    /// responses to [`SearchError::Api`].
    async fn execute(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<(StatusCode, String), SearchError> {
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, %url, "Search request failed.");
            SearchError::Http {
                url: url.to_string(),
                source: err,
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| SearchError::Http {
            url: url.to_string(),
            source: err,
        })?;

        if !status.is_success() {
            warn!(status = %status, %url, "Search service rejected the request.");
            return Err(api_error(status.as_u16(), url.as_str(), &body));
        }

        debug!(status = %status, %url, "Search service accepted the request.");
        Ok((status, body))
    }

    fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, SearchError> {
        serde_json::from_str(body).map_err(|err| SearchError::Decode {
            url: url.to_string(),
            source: err,
        })
    }

    /// `PUT {collection}('{name}')`. When the service answers without a body
    /// the submitted definition is returned as-is.
    async fn put_resource<T>(&self, collection: &str, name: &str, body: &T) -> Result<T, SearchError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let resource = resource_segment(collection, name)?;
        let url = self.url(&[&resource])?;
        debug!(%url, "Creating or updating {collection} resource '{name}'.");

        let request = self
            .request(Method::PUT, &url)
            .header("Prefer", "return=representation")
            .json(body);
        let (status, text) = self.execute(request, &url).await?;

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(body.clone());
        }
        Self::decode(&url, &text)
    }

    pub async fn create_or_update_index(
        &self,
        index: &SearchIndex,
    ) -> Result<SearchIndex, SearchError> {
        self.put_resource(INDEXES, &index.name, index).await
    }

    pub async fn create_or_update_skillset(
        &self,
        skillset: &SearchIndexerSkillset,
    ) -> Result<SearchIndexerSkillset, SearchError> {
        self.put_resource(SKILLSETS, &skillset.name, skillset).await
    }

    pub async fn create_or_update_data_source(
        &self,
        data_source: &SearchIndexerDataSourceConnection,
    ) -> Result<SearchIndexerDataSourceConnection, SearchError> {
        self.put_resource(DATA_SOURCES, &data_source.name, data_source)
            .await
    }

    pub async fn create_or_update_indexer(
        &self,
        indexer: &SearchIndexer,
    ) -> Result<SearchIndexer, SearchError> {
        self.put_resource(INDEXERS, &indexer.name, indexer).await
    }

    /// Ask the service to start an indexer run. Returns once the run has
    /// been accepted, not when it finishes.
    pub async fn run_indexer(&self, name: &str) -> Result<(), SearchError> {
        let resource = resource_segment(INDEXERS, name)?;
        let url = self.url(&[&resource, "search.run"])?;
        debug!(%url, "Requesting indexer run.");
        self.execute(self.request(Method::POST, &url), &url).await?;
        Ok(())
    }

    pub async fn indexer_status(&self, name: &str) -> Result<IndexerStatus, SearchError> {
        let resource = resource_segment(INDEXERS, name)?;
        let url = self.url(&[&resource, "search.status"])?;
        let (_, body) = self
            .execute(self.request(Method::GET, &url), &url)
            .await?;
        Self::decode(&url, &body)
    }

    pub async fn search(
        &self,
        index_name: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        let resource = resource_segment(INDEXES, index_name)?;
        let url = self.url(&[&resource, "docs", "search.post.search"])?;
        debug!(%url, "Querying index.");
        let (_, body) = self
            .execute(self.request(Method::POST, &url).json(request), &url)
            .await?;
        Self::decode(&url, &body)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, SearchError> {
    let url = Url::parse(endpoint.trim()).map_err(|err| SearchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.query().is_some() {
        return Err(SearchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "endpoint must not carry a query string".to_string(),
        });
    }
    Ok(url)
}

/// `collection('name')`, refusing names that would break out of the quotes.
fn resource_segment(collection: &str, name: &str) -> Result<String, SearchError> {
    if name.is_empty()
        || name
            .chars()
            .any(|ch| matches!(ch, '\'' | '/' | '?' | '#' | '%') || ch.is_whitespace())
    {
        return Err(SearchError::InvalidName(name.to_string()));
    }
    Ok(format!("{collection}('{name}')"))
}
