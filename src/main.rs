use affinity::adapter::inbound::cli::{self, command::Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::run(cli).await
}
