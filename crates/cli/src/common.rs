use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use nobel_search_common::{DEFAULT_TABLE_NAME, Environment};
use nobel_search_core::{Provisioner, WaitOptions};
use tracing::debug;

pub const DEFAULT_CSV_PATH: &str = "data/nobel-prize-winners.csv";

#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        default_value = ".env",
        help = "Dotenv file with the service settings. Process environment wins over it"
    )]
    pub env_file: PathBuf,
}

impl EnvArgs {
    pub fn load(&self) -> Result<Environment, String> {
        debug!(path = %self.env_file.display(), "Loading settings.");
        Environment::load(&self.env_file).map_err(|err| err.to_string())
    }
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    #[arg(long, default_value = DEFAULT_TABLE_NAME, help = "SQL table holding the winners")]
    pub table: String,
}

#[derive(Args, Debug, Clone)]
pub struct LoadSourceArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
    #[arg(long, help = "Wait for the indexer run to finish")]
    pub wait: bool,

    #[arg(long, default_value_t = 5, requires = "wait", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_secs: u64,

    #[arg(long, default_value_t = 600, requires = "wait")]
    pub timeout_secs: u64,
}

impl WaitArgs {
    pub fn options(&self) -> Option<WaitOptions> {
        self.wait.then(|| WaitOptions {
            poll_interval: Duration::from_secs(self.poll_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

pub fn provisioner(env: &Environment, table: &str) -> Result<Provisioner, String> {
    let search = env.search().map_err(|err| err.to_string())?;
    Provisioner::from_settings(&search, table).map_err(|err| err.to_string())
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

pub fn format_elapsed_ms(start: Instant) -> String {
    format_duration_ms(start.elapsed())
}

pub fn format_duration_ms(elapsed: Duration) -> String {
    if elapsed.as_secs() == 0 {
        return format!("{}ms", elapsed.as_millis());
    }
    let seconds = elapsed.as_secs();
    let remaining_ms = elapsed.subsec_millis();
    format!("{seconds}s {remaining_ms}ms")
}

pub async fn run_with_spinner_async<T, F, Fut>(
    description: &str,
    success_message: &str,
    f: F,
) -> Result<T, String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, String>>,
{
    let spinner = spinner(description);
    let start = Instant::now();
    let result = f().await;
    spinner.finish_and_clear();
    if result.is_ok() {
        println!("{} ({})", success_message, format_elapsed_ms(start));
    }
    result
}
