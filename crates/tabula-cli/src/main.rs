//! Tabula CLI - inspect the tables plugins declare.
//!
//! Discovers `Tables.toml` manifests from the configured directories, binds
//! each module as a processing source and reports the resulting catalogs.

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
mod discovery;
mod theme;

use commands::{check, config, tables};

/// Tabula - table discovery for trace processing plugins
#[derive(Parser)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every table declared by discovered manifests
    Tables {
        /// Additional directory to search for manifests
        #[arg(short = 'd', long = "manifest-dir")]
        manifest_dirs: Vec<PathBuf>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate manifests and report duplicate table identities
    Check {
        /// Additional directory to search for manifests
        #[arg(short = 'd', long = "manifest-dir")]
        manifest_dirs: Vec<PathBuf>,
    },

    /// Show the resolved configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace_root = std::env::current_dir().ok();
    let resolved = tabula_config::Config::load(workspace_root.as_deref());

    // Set up logging from config, with --verbose override.
    let mut log_config = match &resolved {
        Ok(r) => tabula_telemetry::LogConfig::try_from(&r.config.logging).unwrap_or_else(|e| {
            eprintln!("Invalid logging configuration: {e}");
            tabula_telemetry::LogConfig::default()
        }),
        Err(_) => tabula_telemetry::LogConfig::default(),
    };
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = tabula_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let resolved = resolved.context("failed to load configuration")?;

    match cli.command {
        Commands::Tables {
            manifest_dirs,
            json,
        } => {
            let manifests = discovery::discover(&resolved.config.discovery, &manifest_dirs);
            tables::list_tables(manifests, json)
        },
        Commands::Check { manifest_dirs } => {
            let manifests = discovery::discover(&resolved.config.discovery, &manifest_dirs);
            check::check_manifests(&manifests)
        },
        Commands::Config => config::show_config(&resolved),
    }
}
