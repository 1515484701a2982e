use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
mod common;

use commands::{data_source, index, indexer, load_table, search, setup, skillset};
use common::EnvArgs;

/// Crates whose logs follow the plain `NOBEL_SEARCH_LOG` level.
const WORKSPACE_CRATES: &[&str] = &[
    "nobel_search_cli",
    "nobel_search_core",
    "nobel_search_sdk",
    "nobel_search_db",
    "nobel_search_common",
];

#[derive(Parser, Debug)]
#[command(
    name = "nobel-search",
    version,
    about = "Load Nobel Prize winners into SQL and make them searchable with Azure AI Search"
)]
struct Cli {
    #[command(flatten)]
    env: EnvArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recreate the winners table and load the CSV into it
    LoadTable(load_table::LoadTableArgs),
    /// Create or update the Azure SQL data source connection
    CreateDataSource(data_source::DataSourceArgs),
    /// Create or update the vector search index
    CreateIndex,
    /// Create or update the chunking and embedding skillset
    CreateSkillset,
    /// Create or update the indexer and start a run
    CreateIndexer(indexer::CreateIndexerArgs),
    /// Start an indexer run
    RunIndexer(indexer::RunIndexerArgs),
    /// Show the indexer's last run
    IndexerStatus,
    /// Run every provisioning step in order
    Setup(setup::SetupArgs),
    /// Query the index interactively
    Search(search::SearchArgs),
}

pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(run_cli_async(args))
}

async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing();
            let env = cli.env;
            match cli.command {
                Some(Commands::LoadTable(args)) => load_table::run(args, env).await,
                Some(Commands::CreateDataSource(args)) => data_source::run(args, env).await,
                Some(Commands::CreateIndex) => index::run(env).await,
                Some(Commands::CreateSkillset) => skillset::run(env).await,
                Some(Commands::CreateIndexer(args)) => indexer::run_create(args, env).await,
                Some(Commands::RunIndexer(args)) => indexer::run_run(args, env).await,
                Some(Commands::IndexerStatus) => indexer::run_status(env).await,
                Some(Commands::Setup(args)) => setup::run(args, env).await,
                Some(Commands::Search(args)) => search::run(args, env).await,
                None => {
                    let mut cmd = Cli::command();
                    let _ = cmd.print_help();
                    println!();
                    0
                }
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // NOBEL_SEARCH_LOG takes a plain level ("debug", "warn", ...) applied to
    // the workspace crates, or a full filter spec like "nobel_search_sdk=trace"
    let filter = match std::env::var("NOBEL_SEARCH_LOG") {
        Ok(level) if is_plain_level(&level) => workspace_filter(&level),
        Ok(spec) => spec,
        Err(_) => workspace_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn workspace_filter(level: &str) -> String {
    WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
