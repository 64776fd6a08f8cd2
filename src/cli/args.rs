//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bom::BomArgs, completions::CompletionsArgs, inventory::InventoryArgs, run::RunArgs,
    template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "mfgsim")]
#[command(author, version, about = "Manufacturing simulator")]
#[command(long_about = "Builds products from basic components against a shared stock pool, one unit at a time, and reports manufacturing successes and failure causes.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose logging (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Input file selection shared by commands that load data
#[derive(clap::Args, Clone, Debug, Default)]
pub struct DataArgs {
    /// Components CSV file (default: components.csv)
    #[arg(long, short = 'c')]
    pub components: Option<PathBuf>,

    /// Products CSV file (default: products.csv)
    #[arg(long, short = 'p')]
    pub products: Option<PathBuf>,

    /// CSV field delimiter (default: ';')
    #[arg(long, short = 'd')]
    pub delimiter: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manufacture all requested products and print the report
    Run(RunArgs),

    /// Show the loaded inventory without manufacturing anything
    Inventory(InventoryArgs),

    /// Show each product's bill of materials with unit cost and weight
    Bom(BomArgs),

    /// Print a CSV template for the input files
    Template(TemplateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text tables
    #[default]
    Auto,
    /// Markdown tables
    Md,
    /// JSON format (for programming)
    Json,
}
