use clap::Args;
use console::style;
use nobel_search_common::DEFAULT_TABLE_NAME;
use nobel_search_core::{IndexerRunSummary, Provisioner, RunTicket, WaitOptions};
use nobel_search_sdk::models::{IndexerExecutionStatus, IndexerStatus};

use super::run_cli_async;
use crate::common::{EnvArgs, TableArgs, WaitArgs, provisioner, run_with_spinner_async};

#[derive(Args, Debug, Clone)]
pub struct CreateIndexerArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[arg(long, conflicts_with = "wait", help = "Only create the indexer, do not start a run")]
    pub no_run: bool,

    #[command(flatten)]
    pub wait: WaitArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RunIndexerArgs {
    #[command(flatten)]
    pub wait: WaitArgs,
}

pub async fn run_create(args: CreateIndexerArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| create_inner(args, env)).await
}

pub async fn run_run(args: RunIndexerArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(args, env)).await
}

pub async fn run_status(env: EnvArgs) -> i32 {
    run_cli_async(|| status_inner(env)).await
}

async fn create_inner(args: CreateIndexerArgs, env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let index = env.index().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, &args.table.table)?;

    let created = run_with_spinner_async("Creating indexer...", "Indexer ready", || async {
        provisioner
            .create_indexer(&index.name)
            .await
            .map_err(|err| err.to_string())
    })
    .await?;
    println!(
        "Indexer: {} ({} -> {})",
        created.name, created.data_source_name, created.target_index_name
    );

    if args.no_run {
        return Ok(());
    }
    start_run(&provisioner, &index.name, args.wait.options()).await
}

async fn run_inner(args: RunIndexerArgs, env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let index = env.index().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, DEFAULT_TABLE_NAME)?;
    start_run(&provisioner, &index.name, args.wait.options()).await
}

async fn status_inner(env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let index = env.index().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, DEFAULT_TABLE_NAME)?;
    let status = provisioner
        .indexer_status(&index.name)
        .await
        .map_err(|err| err.to_string())?;
    print_status(&status);
    Ok(())
}

/// Trigger a run and, when asked to, wait for it. Shared with `setup`.
pub(crate) async fn start_run(
    provisioner: &Provisioner,
    index_name: &str,
    wait: Option<WaitOptions>,
) -> Result<(), String> {
    let ticket = run_with_spinner_async("Starting indexer run...", "Indexer run requested", || async {
        provisioner
            .run_indexer(index_name)
            .await
            .map_err(|err| err.to_string())
    })
    .await?;
    if let Some(started) = ticket.joined_start {
        println!(
            "{} was already running (started {started}), following that run",
            ticket.indexer
        );
    }

    if let Some(options) = wait {
        let summary = wait_for(provisioner, &ticket, options).await?;
        print_summary(&summary);
    }
    Ok(())
}

async fn wait_for(
    provisioner: &Provisioner,
    ticket: &RunTicket,
    options: WaitOptions,
) -> Result<IndexerRunSummary, String> {
    run_with_spinner_async(
        &format!("Waiting for {}...", ticket.indexer),
        "Indexer run finished",
        || async {
            provisioner
                .wait_for_indexer(ticket, options)
                .await
                .map_err(|err| err.to_string())
        },
    )
    .await
}

fn print_summary(summary: &IndexerRunSummary) {
    let failed = if summary.items_failed > 0 {
        style(summary.items_failed.to_string()).red().to_string()
    } else {
        summary.items_failed.to_string()
    };
    println!(
        "Processed {} items, {} failed, {} warnings",
        summary.items_processed, failed, summary.warnings
    );
    if let Some(duration) = summary.duration {
        println!("Run took {}s", duration.num_seconds());
    }
}

fn print_status(status: &IndexerStatus) {
    println!("Indexer status: {:?}", status.status);
    let Some(last) = &status.last_result else {
        println!("No runs yet");
        return;
    };

    let run_status = format!("{:?}", last.status);
    let run_status = match last.status {
        IndexerExecutionStatus::Success => style(run_status).green(),
        IndexerExecutionStatus::TransientFailure => style(run_status).red(),
        _ => style(run_status).yellow(),
    };
    println!("Last run: {run_status}");
    if let Some(start) = last.start_time {
        println!("Started: {}", start.to_rfc3339());
    }
    if let Some(end) = last.end_time {
        println!("Ended: {}", end.to_rfc3339());
    }
    println!(
        "Items processed: {}, failed: {}",
        last.items_processed, last.items_failed
    );
    if let Some(message) = &last.error_message {
        println!("Error: {}", style(message).red());
    }
    for issue in &last.errors {
        println!(
            "  {} {}: {}",
            style("error").red(),
            issue.key.as_deref().unwrap_or("-"),
            issue.message.as_deref().unwrap_or_default()
        );
    }
    for issue in &last.warnings {
        println!(
            "  {} {}: {}",
            style("warning").yellow(),
            issue.key.as_deref().unwrap_or("-"),
            issue.message.as_deref().unwrap_or_default()
        );
    }
}
