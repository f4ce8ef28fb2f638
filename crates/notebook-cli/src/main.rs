//! Notebook CLI
//!
//! Command-line interface for inspecting the notebook's interpreters

use clap::{Parser, Subcommand};
use notebook_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "notebook")]
#[command(about = "Notebook - Interpreter registry inspection", long_about = None)]
struct Cli {
    /// Emit JSON logs on stderr instead of human-readable ones
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interpreter listing and lookup
    Interpreters(commands::interpreters::InterpretersArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Interpreters(args) => commands::interpreters::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
