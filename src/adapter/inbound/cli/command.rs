//! Command-line interface definitions.
//!
//! Defines the CLI structure for the affinity engine using `clap`: record
//! orders, query suggestions, clear scores, manage the product catalog and
//! check store connectivity.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::ProductId;

/// Product co-purchase recommendation CLI
#[derive(Parser, Debug)]
#[command(name = "affinity")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the affinity CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record the products of one completed order
    Record(RecordArgs),

    /// Show the products most often bought with the given ones
    Suggest(SuggestArgs),

    /// Clear affinity scores for the given products, or the whole catalog
    Clear(ClearArgs),

    /// Manage the product catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Check that the configured store is reachable
    Check,
}

/// Arguments for `record`.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Product IDs in the order
    #[arg(required = true, num_args = 1..)]
    pub products: Vec<ProductId>,
}

/// Arguments for `suggest`.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Product IDs to find companions for
    #[arg(required = true, num_args = 1..)]
    pub products: Vec<ProductId>,

    /// Maximum number of suggestions [default: recommender.max_results]
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for `clear`.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Product IDs to clear; every catalog product when omitted
    pub products: Vec<ProductId>,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Add or replace a product
    Add(CatalogAddArgs),

    /// List every product
    List,
}

/// Arguments for `catalog add`.
#[derive(Args, Debug)]
pub struct CatalogAddArgs {
    /// Product ID
    #[arg(long)]
    pub id: ProductId,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price
    #[arg(long)]
    pub price: Decimal,

    /// URL slug [default: derived from the name]
    #[arg(long)]
    pub slug: Option<String>,

    /// Mark the product as not available for sale
    #[arg(long)]
    pub unavailable: bool,
}
