//! SQLite backend for local dry runs.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::DbError;
use crate::record::NobelPrizeWinner;
use crate::schema::{Dialect, validate_table_name};
use crate::table::WinnerTable;

#[derive(Debug, Clone)]
pub struct SqliteTable {
    pool: SqlitePool,
    table: String,
}

impl SqliteTable {
    /// Open (creating if needed) the database at `url`, e.g.
    /// `sqlite://nobel.db` or `sqlite::memory:`.
    pub async fn connect(url: &str, table: &str) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps in-memory databases alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::from_pool(pool, table)
    }

    pub fn from_pool(pool: SqlitePool, table: &str) -> Result<Self, DbError> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }
}

impl WinnerTable for SqliteTable {
    fn table_name(&self) -> &str {
        &self.table
    }

    async fn recreate(&mut self) -> Result<(), DbError> {
        let dialect = Dialect::Sqlite;
        sqlx::query(&dialect.drop_table(&self.table))
            .execute(&self.pool)
            .await?;
        sqlx::query(&dialect.create_table(&self.table))
            .execute(&self.pool)
            .await?;
        info!(table = %self.table, "Created new table.");
        Ok(())
    }

    async fn insert_all(&mut self, rows: &[NobelPrizeWinner]) -> Result<u64, DbError> {
        let insert = Dialect::Sqlite.insert_row(&self.table);
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(&insert)
                .bind(row.year)
                .bind(&row.discipline)
                .bind(&row.winner)
                .bind(&row.description)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
