//! Example: Run one full classification pass.
//!
//! Usage: cargo run --example pipeline
//!
//! Loads the configured dataset, trains a model first if none is persisted,
//! classifies every failure description and appends the results to the
//! history log.

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

    commands::classify::run(&config, None)
}
