pub mod completions;
pub mod generate;
pub mod init;
pub mod list;
pub mod validate;

use clap::{Parser, Subcommand};
use log::LevelFilter;

/// tilegen - Procedural tile-based level generator
#[derive(Parser, Debug)]
#[command(name = "tilegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (off, error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a level and print it
    Generate(generate::GenerateArgs),

    /// Initialize a tilegen project (generates tilegen.yaml)
    Init(init::InitArgs),

    /// List themes, models and tiles
    List(list::ListArgs),

    /// Check tile sets for gaps and generated grids for consistency
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
