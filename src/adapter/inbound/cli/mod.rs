//! CLI module graph and dispatch.

pub mod catalog;
pub mod check;
pub mod clear;
pub mod command;
pub mod diagnostic;
pub mod output;
pub mod record;
pub mod suggest;

use command::{CatalogCommand, Cli, Commands};
use output::OutputConfig;

use crate::error::Result;
use crate::infrastructure::bootstrap::build_recommender;
use crate::infrastructure::config::settings::Config;

/// Run a parsed command line to completion.
///
/// # Errors
/// Returns a rendered diagnostic when configuration cannot be loaded or the
/// command fails.
pub async fn run(cli: Cli) -> miette::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = diagnostic::load_config(&cli.config)?;
    config.init_logging();

    dispatch(cli.command, &config)
        .await
        .map_err(diagnostic::report)
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Record(args) => {
            let service = build_recommender(config).await;
            record::execute(&service, &args.products).await
        }
        Commands::Suggest(args) => {
            let service = build_recommender(config).await;
            suggest::execute(&service, &args.products, args.limit).await
        }
        Commands::Clear(args) => {
            let service = build_recommender(config).await;
            clear::execute(&service, &args.products).await
        }
        Commands::Catalog(CatalogCommand::Add(args)) => catalog::execute_add(config, args),
        Commands::Catalog(CatalogCommand::List) => catalog::execute_list(config).await,
        Commands::Check => check::execute(config).await,
    }
}
