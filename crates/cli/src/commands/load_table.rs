use clap::Args;
use nobel_search_core::{LoadReport, LoadTimings, load_table};
use nobel_search_db::{SqlServerTable, SqliteTable};
use tracing::info;

use super::run_cli_async;
use crate::common::{EnvArgs, LoadSourceArgs, format_duration_ms, run_with_spinner_async};

#[derive(Args, Debug, Clone)]
pub struct LoadTableArgs {
    #[command(flatten)]
    pub source: LoadSourceArgs,

    #[arg(
        long,
        value_name = "URL",
        help = "Load into a SQLite database instead of SQL Server, e.g. sqlite://nobel.db"
    )]
    pub sqlite: Option<String>,
}

pub async fn run(args: LoadTableArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(args, env)).await
}

async fn run_inner(args: LoadTableArgs, env: EnvArgs) -> Result<(), String> {
    let report = load(&args.source, args.sqlite.as_deref(), &env).await?;
    print_report(&report, &args.source.table.table);
    Ok(())
}

pub(crate) fn print_report(report: &LoadReport, table: &str) {
    println!(
        "Loaded {} of {} rows into {table} ({})",
        report.rows_inserted,
        report.rows_read,
        format_timings(&report.timings)
    );
}

fn format_timings(timings: &LoadTimings) -> String {
    format!(
        "read {}, recreate {}, insert {}",
        format_duration_ms(timings.read),
        format_duration_ms(timings.recreate),
        format_duration_ms(timings.insert)
    )
}

/// Load the CSV into SQLite when `sqlite` is given, SQL Server otherwise.
/// Shared with `setup`, which always loads SQL Server.
pub(crate) async fn load(
    source: &LoadSourceArgs,
    sqlite: Option<&str>,
    env: &EnvArgs,
) -> Result<LoadReport, String> {
    let table = source.table.table.as_str();
    run_with_spinner_async(
        &format!("Loading {} into {table}...", source.csv.display()),
        "Table loaded",
        || async {
            match sqlite {
                Some(url) => {
                    info!(url = %url, table, "Using SQLite backend.");
                    let mut backend = SqliteTable::connect(url, table)
                        .await
                        .map_err(|err| err.to_string())?;
                    load_table(&mut backend, &source.csv)
                        .await
                        .map_err(|err| err.to_string())
                }
                None => {
                    let sql = env.load()?.sql().map_err(|err| err.to_string())?;
                    info!(
                        connection = %sql.redacted_connection_string(),
                        table,
                        "Using SQL Server backend."
                    );
                    let mut backend = SqlServerTable::connect(&sql.connection_string(), table)
                        .await
                        .map_err(|err| err.to_string())?;
                    load_table(&mut backend, &source.csv)
                        .await
                        .map_err(|err| err.to_string())
                }
            }
        },
    )
    .await
}
