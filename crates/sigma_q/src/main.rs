//! SIGMA-Q quality-control classification core
//!
//! Loads assembly-line defect reports, classifies free-text failure
//! descriptions into defect categories and maintains the classification
//! history log.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;

/// SIGMA-Q quality-control classification core
#[derive(Parser)]
#[command(name = "sigma-q")]
#[command(about = "Defect classification for assembly-line quality reports")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and clean the quality-control dataset
    Load {
        /// Path to the dataset file (defaults to the configured base)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Comma-separated subset of columns to load
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Check whether the dataset file changed on disk
    Monitor {
        /// Path to the dataset file (defaults to the configured base)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Previously observed modification time, in seconds since the epoch
        #[arg(short, long)]
        last_mtime: Option<u64>,
    },

    /// Train the classification model on the labeled base
    Train,

    /// Classify the dataset and append the results to the history log
    Classify {
        /// Path to the dataset file (defaults to the configured base)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Report which resources (dataset, model artifacts, log) are available
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    match cli.command {
        Commands::Load { path, columns } => {
            commands::load::run(&config, path.as_deref(), columns.as_deref())
        }
        Commands::Monitor { path, last_mtime } => {
            commands::monitor::run(&config, path.as_deref(), last_mtime)
        }
        Commands::Train => commands::train::run(&config),
        Commands::Classify { path } => commands::classify::run(&config, path.as_deref()),
        Commands::Status => commands::status::run(&config),
    }
}
