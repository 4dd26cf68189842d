//! Cherry CLI - project configuration tool.
//!
//! Reads and edits the project-local `cherry.toml` with dot-notation paths
//! (`cherry get project.name`, `cherry set app.web.port 8080`).

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::config::{self, ShowFormat};
use logging::{LogConfig, LogFormat};

/// Cherry - project configuration
#[derive(Parser)]
#[command(name = "cherry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root containing cherry.toml (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Extra log directives (e.g. `cherry_config=trace`)
    #[arg(long = "log", global = true)]
    log_directives: Vec<String>,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a dot-notation path
    Get {
        /// Path such as `project.name`
        path: String,
    },

    /// Set the value at a dot-notation path
    Set {
        /// Path such as `app.web.port`; parent tables must exist
        path: String,
        /// TOML literal (`8080`, `true`, `["a"]`) or plain string
        value: String,
    },

    /// Remove the value at a dot-notation path
    Unset {
        /// Path such as `project.legacy`
        path: String,
    },

    /// Show the resolved configuration, env overrides included
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Toml)]
        format: ShowFormat,
    },

    /// Show the config file path being used
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let mut log_config = LogConfig::new(level).with_format(cli.log_format);
    for directive in &cli.log_directives {
        log_config = log_config.with_directive(directive.as_str());
    }
    if cli.no_color {
        log_config = log_config.without_ansi();
    }
    if let Err(e) = logging::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let project_root = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    match cli.command {
        Commands::Get { path } => config::run_get(&project_root, &path)?,
        Commands::Set { path, value } => config::run_set(&project_root, &path, &value)?,
        Commands::Unset { path } => config::run_unset(&project_root, &path)?,
        Commands::Show { format } => config::run_show(&project_root, format)?,
        Commands::Path => config::run_path(&project_root),
    }

    Ok(())
}
