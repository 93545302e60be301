//! Lumen CLI
//!
//! Inspect, validate and audit themes defined in `lumen.toml`.

mod commands;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(version, about = "Lumen design-token theme engine", long_about = None)]
struct Cli {
    /// Path to lumen.toml (or a directory containing it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered theme variants and plugins
    List,

    /// Print the flattened variables of a theme
    Show {
        /// Theme variant
        variant: String,

        /// Token override, e.g. colors.primary=#ff0066 (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = commands::parse_assignment)]
        set: Vec<(String, String)>,

        /// Zero all durations and use linear easing
        #[arg(long)]
        reduced_motion: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Validate a theme and print its report
    Validate {
        /// Theme variant
        variant: String,

        /// Token override, e.g. spacing.4=18 (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = commands::parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Check the WCAG contrast of two colors
    Contrast {
        /// Foreground color (#rgb, #rrggbb, rgb(...))
        foreground: String,
        /// Background color
        background: String,
    },

    /// Create every variant and print the engine health report
    Health,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Contrast needs no engine
    if let Command::Contrast {
        foreground,
        background,
    } = &cli.command
    {
        return commands::contrast(foreground, background);
    }

    let config = commands::load_config(cli.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    let engine = commands::build_engine(&config)?;

    match cli.command {
        Command::List => commands::list(&engine),
        Command::Show {
            variant,
            set,
            reduced_motion,
            format,
        } => runtime.block_on(commands::show(&engine, &variant, &set, reduced_motion, format)),
        Command::Validate { variant, set } => commands::validate(&engine, &variant, &set),
        Command::Health => commands::health(&engine),
        Command::Contrast { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
