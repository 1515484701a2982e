//! DDL and DML for the winners table in each supported SQL dialect.

use crate::error::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    SqlServer,
    Sqlite,
}

impl Dialect {
    pub fn drop_table(self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {table}")
    }

    pub fn create_table(self, table: &str) -> String {
        let id = match self {
            Dialect::SqlServer => "ID INT IDENTITY(1,1) NOT NULL PRIMARY KEY",
            Dialect::Sqlite => "ID INTEGER PRIMARY KEY AUTOINCREMENT",
        };
        format!(
            "CREATE TABLE {table} ({id}, Year int, Discipline text, Winner text, Description text)"
        )
    }

    pub fn insert_row(self, table: &str) -> String {
        let placeholders = match self {
            Dialect::SqlServer => "@P1, @P2, @P3, @P4",
            Dialect::Sqlite => "?, ?, ?, ?",
        };
        format!(
            "INSERT INTO {table} (Year, Discipline, Winner, Description) VALUES ({placeholders})"
        )
    }
}

/// Table names are spliced into SQL text, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<(), DbError> {
    let valid = table
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
        && table
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidTableName(table.to_string()))
    }
}
