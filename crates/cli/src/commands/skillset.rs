use nobel_search_common::DEFAULT_TABLE_NAME;

use super::run_cli_async;
use crate::common::{EnvArgs, provisioner, run_with_spinner_async};

pub async fn run(env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(env)).await
}

async fn run_inner(env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let index = env.index().map_err(|err| err.to_string())?;
    let openai = env.openai().map_err(|err| err.to_string())?;
    let provisioner = provisioner(&env, DEFAULT_TABLE_NAME)?;

    let created = run_with_spinner_async("Creating skillset...", "Skillset ready", || async {
        provisioner
            .create_skillset(&index.name, &openai)
            .await
            .map_err(|err| err.to_string())
    })
    .await?;
    println!("Skillset: {} ({} skills)", created.name, created.skills.len());
    Ok(())
}
