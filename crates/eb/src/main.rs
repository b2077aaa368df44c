//! Encounterbrew CLI - description text engine.
//!
//! Provides commands for:
//! - `render`: Render description text (arguments or stdin) for display
//! - `lookup`: Print the localized text at a dot-separated path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LookupArgs, RenderArgs};
use output::Output;

/// Encounterbrew - description text engine.
#[derive(Parser)]
#[command(name = "eb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render description text for display.
    Render(RenderArgs),
    /// Look up a localization path.
    Lookup(LookupArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Lookup(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Lookup(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
