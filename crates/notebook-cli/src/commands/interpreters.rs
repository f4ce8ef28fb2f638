//! Interpreter commands
//!
//! Usage:
//!   notebook interpreters list [--config FILE] [--wheel | --wheel-first] [--json]
//!   notebook interpreters default [--config FILE]
//!   notebook interpreters show <KEY> [--config FILE]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use notebook_core::errors::{ExError, ExErrorKind};
use notebook_core::{
    Catalog, ConfigProvider, InterpreterDefinition, InterpreterRegistry, StaticAppRegistry,
    TomlFileConfig,
};

#[derive(Debug, Args)]
pub struct InterpretersArgs {
    #[command(subcommand)]
    pub command: InterpretersCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterpretersCommand {
    /// Print the resolved interpreters in order
    List(ListArgs),
    /// Print the interpreter selected by default
    Default(ConfigArgs),
    /// Print one resolved interpreter as JSON
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Notebook configuration file
    #[arg(long, default_value = "notebook.toml")]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only the interpreters shown on the wheel
    #[arg(long, conflicts_with = "wheel_first")]
    pub wheel: bool,

    /// Wheel interpreters first, then the rest
    #[arg(long, conflicts_with = "wheel")]
    pub wheel_first: bool,

    /// Print JSON instead of one line per interpreter
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Interpreter key, e.g. `hive`
    pub key: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute interpreters command
pub fn execute(args: InterpretersArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        InterpretersCommand::List(list_args) => execute_list(list_args),
        InterpretersCommand::Default(config_args) => execute_default(config_args),
        InterpretersCommand::Show(show_args) => execute_show(show_args),
    }
}

/// Build a registry from the configuration file
///
/// Installed modules come from `[apps]`; the blacklist also disables modules.
fn open_registry(args: &ConfigArgs) -> Result<InterpreterRegistry, ExError> {
    let config = Arc::new(TomlFileConfig::open(args.config.clone())?);

    let apps = StaticAppRegistry::new(config.apps().installed);
    apps.load_apps(config.get().app_blacklist);

    Ok(InterpreterRegistry::new(
        Catalog::notebook_default(),
        Arc::new(apps),
        config,
    ))
}

fn execute_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = open_registry(&args.config)?;

    let interpreters: Vec<InterpreterDefinition> = if args.wheel {
        registry.wheel_interpreters()
    } else if args.wheel_first {
        registry.wheel_first_interpreters()
    } else {
        registry.ordered_interpreters().to_vec()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&interpreters)?);
    } else {
        for interpreter in &interpreters {
            print_line(interpreter);
        }
    }

    Ok(())
}

fn execute_default(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = open_registry(&args)?;

    let interpreter = registry.default_interpreter().ok_or_else(|| {
        ExError::new(ExErrorKind::NotFound)
            .with_op("default_interpreter")
            .with_message("No interpreter is enabled")
    })?;
    print_line(&interpreter);

    Ok(())
}

fn execute_show(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = open_registry(&args.config)?;

    let interpreter = registry
        .find(&args.key)
        .map_err(|e| ExError::from(e).with_op("show_interpreter"))?;
    println!("{}", serde_json::to_string_pretty(&interpreter)?);

    Ok(())
}

fn print_line(interpreter: &InterpreterDefinition) {
    println!(
        "{}\t{}\t{}",
        interpreter.key, interpreter.display_name, interpreter.interface
    );
}
