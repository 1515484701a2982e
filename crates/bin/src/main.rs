fn main() {
    let args: Vec<String> = std::env::args().collect();
    std::process::exit(nobel_search_cli::run_cli(args));
}
