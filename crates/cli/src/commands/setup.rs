use clap::Args;

use super::indexer::start_run;
use super::load_table::{load, print_report};
use super::run_cli_async;
use crate::common::{EnvArgs, LoadSourceArgs, WaitArgs, provisioner, run_with_spinner_async};

#[derive(Args, Debug, Clone)]
pub struct SetupArgs {
    #[command(flatten)]
    pub source: LoadSourceArgs,

    #[arg(long, help = "Keep the existing table contents")]
    pub skip_load: bool,

    #[command(flatten)]
    pub wait: WaitArgs,
}

pub async fn run(args: SetupArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(args, env)).await
}

async fn run_inner(args: SetupArgs, env_args: EnvArgs) -> Result<(), String> {
    let env = env_args.load()?;
    // Resolve every setting up front so a typo fails before the table is dropped.
    let sql = env.sql().map_err(|err| err.to_string())?;
    let index = env.index().map_err(|err| err.to_string())?;
    let openai = env.openai().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, &args.source.table.table)?;

    if args.skip_load {
        println!("Skipping table load");
    } else {
        // The indexer reads the SQL Server table, so setup never loads SQLite.
        let report = load(&args.source, None, &env_args).await?;
        print_report(&report, &args.source.table.table);
    }

    run_with_spinner_async("Creating data source...", "Data source ready", || async {
        provisioner
            .create_data_source(&sql)
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    })
    .await?;

    run_with_spinner_async("Creating index...", "Index ready", || async {
        provisioner
            .create_index(&index, &openai)
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    })
    .await?;

    run_with_spinner_async("Creating skillset...", "Skillset ready", || async {
        provisioner
            .create_skillset(&index.name, &openai)
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    })
    .await?;

    run_with_spinner_async("Creating indexer...", "Indexer ready", || async {
        provisioner
            .create_indexer(&index.name)
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    })
    .await?;

    start_run(&provisioner, &index.name, args.wait.options()).await?;
    println!("Setup complete for index {}", index.name);
    Ok(())
}
