//! SQL Server / Azure SQL backend over TDS.

use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::record::NobelPrizeWinner;
use crate::schema::{Dialect, validate_table_name};
use crate::table::WinnerTable;

pub struct SqlServerTable {
    client: Client<Compat<TcpStream>>,
    table: String,
}

impl std::fmt::Debug for SqlServerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlServerTable")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SqlServerTable {
    /// Connect with an ADO.NET connection string. Azure SQL gateways may
    /// answer with a redirect to the actual node, which is followed once.
    pub async fn connect(connection_string: &str, table: &str) -> Result<Self, DbError> {
        validate_table_name(table)?;
        let config = Config::from_ado_string(connection_string)?;

        let client = match Self::open(config.clone()).await {
            Err(DbError::SqlServer(tiberius::error::Error::Routing { host, port })) => {
                debug!(%host, port, "SQL gateway redirected the connection.");
                let mut routed = config;
                routed.host(&host);
                routed.port(port);
                Self::open(routed).await?
            }
            other => other?,
        };

        info!(table, "Connected to SQL Server.");
        Ok(Self {
            client,
            table: table.to_string(),
        })
    }

    async fn open(config: Config) -> Result<Client<Compat<TcpStream>>, DbError> {
        let addr = config.get_addr();
        let tcp = TcpStream::connect(&addr)
            .await
            .map_err(|source| DbError::Connect {
                addr: addr.clone(),
                source,
            })?;
        tcp.set_nodelay(true)
            .map_err(|source| DbError::Connect { addr, source })?;
        Ok(Client::connect(config, tcp.compat_write()).await?)
    }

    async fn insert_in_transaction(&mut self, rows: &[NobelPrizeWinner]) -> Result<u64, DbError> {
        let insert = Dialect::SqlServer.insert_row(&self.table);
        let mut inserted = 0;
        for row in rows {
            let result = self
                .client
                .execute(
                    insert.as_str(),
                    &[
                        &row.year,
                        &row.discipline.as_str(),
                        &row.winner.as_str(),
                        &row.description.as_str(),
                    ],
                )
                .await?;
            inserted += result.total();
        }
        Ok(inserted)
    }
}

impl WinnerTable for SqlServerTable {
    fn table_name(&self) -> &str {
        &self.table
    }

    async fn recreate(&mut self) -> Result<(), DbError> {
        let dialect = Dialect::SqlServer;
        self.client
            .execute(dialect.drop_table(&self.table), &[])
            .await?;
        self.client
            .execute(dialect.create_table(&self.table), &[])
            .await?;
        info!(table = %self.table, "Created new table.");
        Ok(())
    }

    async fn insert_all(&mut self, rows: &[NobelPrizeWinner]) -> Result<u64, DbError> {
        // Transaction control has to go through plain batches; wrapping it in
        // sp_executesql would unbalance the transaction count.
        self.client
            .simple_query("BEGIN TRANSACTION")
            .await?
            .into_results()
            .await?;

        match self.insert_in_transaction(rows).await {
            Ok(inserted) => {
                self.client
                    .simple_query("COMMIT TRANSACTION")
                    .await?
                    .into_results()
                    .await?;
                Ok(inserted)
            }
            Err(err) => {
                if let Ok(stream) = self.client.simple_query("ROLLBACK TRANSACTION").await {
                    if let Err(rollback_err) = stream.into_results().await {
                        warn!(error = %rollback_err, "Rollback failed.");
                    }
                }
                Err(err)
            }
        }
    }
}
