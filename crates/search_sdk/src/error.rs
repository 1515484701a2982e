use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid resource name '{0}'")]
    InvalidName(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Search service returned HTTP {status} for {url}: {message}")]
    Api {
        status: u16,
        url: String,
        code: Option<String>,
        message: String,
    },

    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
    /// HTTP status returned by the service, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error envelope used by the service: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Turn a non-success response body into an [`SearchError::Api`].
pub(crate) fn api_error(status: u16, url: &str, body: &str) -> SearchError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) if body.trim().is_empty() => (None, "empty response body".to_string()),
        Err(_) => (None, body.trim().to_string()),
    };
    SearchError::Api {
        status,
        url: url.to_string(),
        code,
        message,
    }
}
