//! Status command - reports which resources are available.

use std::path::Path;

use anyhow::Result;
use config::Config;
use tracing::{info, warn};

/// Runs the status command.
pub fn run(config: &Config) -> Result<()> {
    report("dataset", &config.dataset_path);
    report("training base", &config.training_base_path);
    report("classification log", &config.log_path);

    if ml_model::has_model(config) {
        info!("model artifacts present, automatic classification available");
    } else {
        warn!("no trained model found, run `sigma-q train` first");
    }

    Ok(())
}

fn report(resource: &str, path: &Path) {
    if path.exists() {
        info!(resource, path = %path.display(), "available");
    } else {
        warn!(resource, path = %path.display(), "missing");
    }
}
