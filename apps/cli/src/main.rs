//! # depwarn CLI entry point
//!
//! Parses arguments, layers configuration and dispatches to the command
//! handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

mod check;
mod config;
mod input;
mod schema_check;

use config::{CliConfig, OutputFormat, Overrides};

/// Report deprecated fields that are still set in configuration files.
#[derive(Parser, Debug)]
#[command(name = "depwarn", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (default: ./depwarn.toml if present).
    #[arg(long, global = true, env = "DEPWARN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan documents for deprecated fields that hold a value.
    Check(CheckArgs),

    /// Parse a schema and report malformed deprecation annotations.
    SchemaCheck(SchemaCheckArgs),
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Schema describing the documents' fields (YAML or JSON).
    #[arg(long, short)]
    schema: PathBuf,

    /// Documents to scan (YAML or JSON).
    #[arg(required = true)]
    documents: Vec<PathBuf>,

    /// Output format for warnings.
    #[arg(long, short, value_enum)]
    output: Option<OutputFormat>,

    /// Fail on malformed deprecation annotations instead of ignoring them.
    #[arg(long)]
    strict: bool,

    /// Root path prepended to every reported field.
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(clap::Args, Debug)]
struct SchemaCheckArgs {
    /// Schema file to inspect (YAML or JSON).
    schema: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let overrides = match &cli.command {
        Commands::Check(args) => Overrides {
            output: args.output,
            policy: args.strict.then_some(depwarn::AnnotationPolicy::Strict),
            prefix: args.prefix.clone(),
        },
        Commands::SchemaCheck(_) => Overrides::default(),
    };
    let config = CliConfig::load(cli.config.as_deref(), &overrides)?;

    let mut logging = config.logging.clone();
    match cli.verbose {
        0 => {}
        1 => logging.level = "debug".into(),
        _ => logging.level = "trace".into(),
    }
    depwarn_log::init_with(logging)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Check(args) => check::run(&config, &args.schema, &args.documents),
        Commands::SchemaCheck(args) => schema_check::run(&args.schema),
    }
}
