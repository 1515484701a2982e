use clap::Args;

use super::run_cli_async;
use crate::common::{EnvArgs, TableArgs, provisioner, run_with_spinner_async};

#[derive(Args, Debug, Clone)]
pub struct DataSourceArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

pub async fn run(args: DataSourceArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(args, env)).await
}

async fn run_inner(args: DataSourceArgs, env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let sql = env.sql().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, &args.table.table)?;

    let created = run_with_spinner_async("Creating data source...", "Data source ready", || async {
        provisioner
            .create_data_source(&sql)
            .await
            .map_err(|err| err.to_string())
    })
    .await?;
    println!("Data source: {} (container {})", created.name, created.container.name);
    Ok(())
}
