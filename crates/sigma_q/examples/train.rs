//! Example: Train the classification model on the labeled base.
//!
//! Usage: cargo run --example train
//!
//! Expects the labeled base at the configured `SIGMA_TRAINING_BASE_PATH`
//! (default: `data/base_de_dados_unificada.csv`).

use anyhow::Result;
use config::Config;
use sigma_q::commands;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let config = Config::from_env();

    commands::train::run(&config)
}
