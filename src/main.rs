use clap::Parser;
use miette::Result;
use tilegen::cli::{Cli, Commands};
use tilegen::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let printer = Printer::new();
    match cli.command {
        Commands::Generate(args) => tilegen::cli::generate::run(args, &printer)?,
        Commands::Init(args) => tilegen::cli::init::run(args, &printer)?,
        Commands::List(args) => tilegen::cli::list::run(args, &printer)?,
        Commands::Validate(args) => tilegen::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => tilegen::cli::completions::run(args)?,
    }

    Ok(())
}
