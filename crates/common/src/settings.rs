//! Settings for the search service, Azure OpenAI and the SQL database.
//!
//! Values come from the process environment first and the `.env` file
//! second. Each consumer asks only for the section it needs, so loading the
//! table does not require search credentials and querying does not require
//! SQL credentials.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::dotenv::DotenvFile;
use crate::naming::validate_resource_name;
use crate::secret::Secret;

pub const DEFAULT_API_VERSION: &str = "2024-07-01";
pub const DEFAULT_EMBEDDING_DIMENSIONS: u32 = 1536;
pub const DEFAULT_MODEL_NAME: &str = "text-embedding-ada-002";
pub const DEFAULT_OPENAI_API_TYPE: &str = "azure";

const SEARCH_ENDPOINT: &str = "AZURE_SEARCH_ENDPOINT";
const SEARCH_KEY: &str = "AZURE_SEARCH_KEY";
const SEARCH_INDEX_NAME: &str = "AZURE_SEARCH_INDEX_NAME";
const SEARCH_DIMENSIONS: &str = "AZURE_SEARCH_EMBEDDING_DIMENSIONS";
const SEARCH_API_VERSION: &str = "AZURE_SEARCH_API_VERSION";
const OPENAI_URI: &str = "OPENAI_URI";
const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const OPENAI_DEPLOYMENT: &str = "OPENAI_DEPLOYMENT";
const OPENAI_MODEL_NAME: &str = "OPENAI_MODEL_NAME";
const OPENAI_API_TYPE: &str = "OPENAI_API_TYPE";
const SQL_SERVER_NAME: &str = "SQL_SERVER_NAME";
const SQL_DATABASE_NAME: &str = "SQL_DATABASE_NAME";
const SQL_USERNAME: &str = "SQL_USERNAME";
const SQL_PASSWORD: &str = "SQL_PASSWORD";

/// Every variable the tools read, used to pick them out of the process
/// environment.
const KNOWN_VARS: &[&str] = &[
    SEARCH_ENDPOINT,
    SEARCH_KEY,
    SEARCH_INDEX_NAME,
    SEARCH_DIMENSIONS,
    SEARCH_API_VERSION,
    OPENAI_URI,
    OPENAI_API_KEY,
    OPENAI_DEPLOYMENT,
    OPENAI_MODEL_NAME,
    OPENAI_API_TYPE,
    SQL_SERVER_NAME,
    SQL_DATABASE_NAME,
    SQL_USERNAME,
    SQL_PASSWORD,
    "SQL_DRIVER",
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required setting {0}. Set it in the environment or in the .env file")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("{0}")]
    Dotenv(String),
}

/// Connection details for the search service.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: Secret,
    pub api_version: String,
}

/// The index being provisioned or queried.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub name: String,
    pub embedding_dimensions: u32,
}

/// Azure OpenAI resource used by the vectorizer and the embedding skill.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub resource_uri: String,
    pub api_key: Secret,
    pub deployment_id: String,
    pub model_name: String,
    pub api_type: String,
}

/// SQL database holding the winners table.
#[derive(Debug, Clone)]
pub struct SqlSettings {
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: Secret,
}

impl SqlSettings {
    fn connection_string_with(&self, password: &str) -> String {
        let server = self.server.strip_prefix("tcp:").unwrap_or(&self.server);
        format!(
            "Server=tcp:{server};Database={};User ID={};Password={};Encrypt=True;TrustServerCertificate=False;Connection Timeout=30;",
            ado_value(&self.database),
            ado_value(&self.username),
            ado_value(password)
        )
    }

    /// ADO.NET style connection string, accepted both by the TDS driver and
    /// by the search service's `azuresql` data source.
    pub fn connection_string(&self) -> String {
        self.connection_string_with(self.password.expose())
    }

    /// Same as [`Self::connection_string`] with the password masked.
    pub fn redacted_connection_string(&self) -> String {
        self.connection_string_with("***")
    }
}

/// Quote an ADO.NET value that would otherwise be split at `;` or `=`, or
/// lose its surrounding spaces. Double quotes inside double quotes are doubled.
fn ado_value(value: &str) -> Cow<'_, str> {
    let plain = value.trim() == value && !value.contains([';', '=', '"', '\'', '{', '}']);
    if plain {
        Cow::Borrowed(value)
    } else if value.contains('"') && !value.contains('\'') {
        Cow::Owned(format!("'{value}'"))
    } else {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    }
}

/// Merged view of the process environment and the `.env` file.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Load `.env` (if present) and overlay the process environment on top.
    pub fn load(env_file: &Path) -> Result<Self, SettingsError> {
        let dotenv = DotenvFile::read(env_file).map_err(SettingsError::Dotenv)?;
        let mut vars = dotenv.get_vars();
        debug!(
            path = %env_file.display(),
            count = vars.len(),
            "Read settings from dotenv file."
        );

        for name in KNOWN_VARS {
            if let Ok(value) = std::env::var(name) {
                vars.insert((*name).to_string(), value);
            }
        }

        Ok(Self { vars })
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    fn optional(&self, var: &'static str) -> Option<&str> {
        self.vars
            .get(var)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, SettingsError> {
        self.optional(var)
            .map(str::to_string)
            .ok_or(SettingsError::Missing(var))
    }

    pub fn search(&self) -> Result<SearchSettings, SettingsError> {
        let endpoint = self.required(SEARCH_ENDPOINT)?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(SettingsError::Invalid {
                var: SEARCH_ENDPOINT,
                reason: format!("'{endpoint}' is not an http(s) URL"),
            });
        }

        Ok(SearchSettings {
            endpoint,
            api_key: Secret::new(self.required(SEARCH_KEY)?),
            api_version: self
                .optional(SEARCH_API_VERSION)
                .unwrap_or(DEFAULT_API_VERSION)
                .to_string(),
        })
    }

    pub fn index(&self) -> Result<IndexSettings, SettingsError> {
        let name = self.required(SEARCH_INDEX_NAME)?;
        validate_resource_name(&name).map_err(|reason| SettingsError::Invalid {
            var: SEARCH_INDEX_NAME,
            reason,
        })?;

        let embedding_dimensions = match self.optional(SEARCH_DIMENSIONS) {
            None => DEFAULT_EMBEDDING_DIMENSIONS,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|dims| *dims > 0)
                .ok_or_else(|| SettingsError::Invalid {
                    var: SEARCH_DIMENSIONS,
                    reason: format!("'{raw}' is not a positive integer"),
                })?,
        };

        Ok(IndexSettings {
            name,
            embedding_dimensions,
        })
    }

    pub fn openai(&self) -> Result<OpenAiSettings, SettingsError> {
        Ok(OpenAiSettings {
            resource_uri: self.required(OPENAI_URI)?,
            api_key: Secret::new(self.required(OPENAI_API_KEY)?),
            deployment_id: self.required(OPENAI_DEPLOYMENT)?,
            model_name: self
                .optional(OPENAI_MODEL_NAME)
                .unwrap_or(DEFAULT_MODEL_NAME)
                .to_string(),
            api_type: self
                .optional(OPENAI_API_TYPE)
                .unwrap_or(DEFAULT_OPENAI_API_TYPE)
                .to_string(),
        })
    }

    pub fn sql(&self) -> Result<SqlSettings, SettingsError> {
        Ok(SqlSettings {
            server: self.required(SQL_SERVER_NAME)?,
            database: self.required(SQL_DATABASE_NAME)?,
            username: self.required(SQL_USERNAME)?,
            password: Secret::new(self.required(SQL_PASSWORD)?),
        })
    }
}
