use clap::{Args, ValueEnum};
use console::style;
use dialoguer::Input;
use nobel_search_core::query::EXIT_COMMAND;
use nobel_search_core::{QueryOptions, SearchMode, build_request, is_quit, render_response};
use nobel_search_sdk::SearchServiceClient;
use tracing::debug;

use super::run_cli_async;
use crate::common::EnvArgs;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Vector,
    Hybrid,
    Semantic,
}

impl From<Mode> for SearchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Vector => SearchMode::Vector,
            Mode::Hybrid => SearchMode::Hybrid,
            Mode::Semantic => SearchMode::Semantic,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[arg(long, value_enum, default_value_t = Mode::Hybrid)]
    pub mode: Mode,

    #[arg(long, help = "Run a single query and exit instead of prompting")]
    pub query: Option<String>,

    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub top: u32,
}

pub async fn run(args: SearchArgs, env: EnvArgs) -> i32 {
    run_cli_async(|| run_inner(args, env)).await
}

async fn run_inner(args: SearchArgs, env: EnvArgs) -> Result<(), String> {
    let env = env.load()?;
    let search = env.search().map_err(|err| err.to_string())?;
    let index = env.index().map_err(|err| err.to_string())?;
    let client = SearchServiceClient::new(
        &search.endpoint,
        search.api_key.expose(),
        search.api_version.clone(),
    )
    .map_err(|err| err.to_string())?;

    let console = Console {
        client,
        index_name: index.name,
        mode: args.mode.into(),
        options: QueryOptions {
            top: args.top,
            ..QueryOptions::default()
        },
    };

    match args.query {
        Some(text) => console.query(&text).await,
        None => console.interact().await,
    }
}

struct Console {
    client: SearchServiceClient,
    index_name: String,
    mode: SearchMode,
    options: QueryOptions,
}

impl Console {
    async fn interact(&self) -> Result<(), String> {
        println!(
            "{} search on {}. Type {} to leave.",
            style(self.mode).bold(),
            style(&self.index_name).cyan(),
            style(EXIT_COMMAND).bold()
        );
        loop {
            let input = Input::<String>::new()
                .with_prompt("Enter your search command")
                .interact_text()
                .map_err(|err| format!("Failed to read search command: {err}"))?;
            if is_quit(&input) {
                break;
            }
            // One failed query should not end the session.
            if let Err(err) = self.query(&input).await {
                eprintln!("{} {err}", style("error:").red().bold());
            }
        }
        println!("Exiting the application.");
        Ok(())
    }

    async fn query(&self, text: &str) -> Result<(), String> {
        let request = build_request(self.mode, text, &self.index_name, self.options);
        debug!(mode = %self.mode, "Sending query.");
        let response = self
            .client
            .search(&self.index_name, &request)
            .await
            .map_err(|err| err.to_string())?;

        let lines = render_response(&response);
        if lines.is_empty() {
            println!("{}", style("No results").dim());
        }
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}
