use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to open CSV file {path}: {source}")]
    OpenCsv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV row at line {line}: {source}")]
    CsvRow {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid year '{value}' at CSV line {line}")]
    InvalidYear { line: u64, value: String },

    #[error("Invalid table name '{0}': use letters, digits and '_' only")]
    InvalidTableName(String),

    #[error("Failed to connect to SQL Server at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL Server error: {0}")]
    SqlServer(#[from] tiberius::error::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),
}
