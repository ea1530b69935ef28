use clap::Parser;

use hrms_client::cli::{self, Cli};
use hrms_client::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli::run(&cli).await
}
