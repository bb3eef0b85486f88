//! Load command - loads and cleans the quality-control dataset.

use std::path::Path;

use anyhow::{Context, Result};
use config::Config;
use tracing::info;

/// Runs the load command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub fn run(config: &Config, path: Option<&Path>, columns: Option<&[String]>) -> Result<()> {
    let table = dataset::load_dataset(path, columns, config)
        .context("could not load the quality-control dataset")?;

    info!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "dataset ready"
    );
    info!(columns = ?table.columns(), "column set");

    Ok(())
}
