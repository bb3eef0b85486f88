//! Train command - fits the classification pipeline on the labeled base.

use anyhow::{Context, Result};
use config::Config;
use tracing::info;

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the labeled base cannot be loaded or training fails.
/// No artifacts are left behind on failure.
pub fn run(config: &Config) -> Result<()> {
    info!("starting model training");

    let base = dataset::load_dataset(Some(&config.training_base_path), None, config)
        .context("could not load the labeled training base")?;

    let trained = ml_model::train_model(&base, config).context("model training failed")?;

    match trained.report.accuracy {
        Some(accuracy) => info!(
            classes = trained.report.classes,
            "model trained and artifacts saved, accuracy {:.2}%",
            accuracy * 100.0
        ),
        None => info!(
            classes = trained.report.classes,
            "model trained and artifacts saved (no held-out evaluation)"
        ),
    }

    Ok(())
}
