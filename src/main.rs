use clap::Parser;
use dexc::cli::{Cli, Commands};
use dexc::output::Printer;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dexc=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => dexc::cli::build::run(args, &printer)?,
        Commands::Check(args) => dexc::cli::check::run(args, &printer)?,
        Commands::Completions(args) => dexc::cli::completions::run(args)?,
    }

    Ok(())
}
