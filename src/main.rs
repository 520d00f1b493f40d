use clap::Parser;
use dockswap::cli::{self, Cli};
use dockswap::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so dry-run output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}
