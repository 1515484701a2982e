pub mod data_source;
pub mod index;
pub mod indexer;
pub mod load_table;
pub mod search;
pub mod setup;
pub mod skillset;

pub async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<(), String>>,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err}", console::style("error:").red().bold());
            1
        }
    }
}
