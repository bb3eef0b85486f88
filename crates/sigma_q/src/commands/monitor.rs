//! Monitor command - timestamp-based dataset change check.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use config::Config;
use tracing::{info, warn};

/// Runs the monitor command.
pub fn run(config: &Config, path: Option<&Path>, last_mtime: Option<u64>) -> Result<()> {
    let path = path.unwrap_or(&config.dataset_path);
    let last = last_mtime.map(|secs| UNIX_EPOCH + Duration::from_secs(secs));

    let (changed, modified) = dataset::monitor_dataset(path, last);

    match modified.map(to_epoch_seconds) {
        Some(mtime) => info!(changed, mtime, path = %path.display(), "dataset monitored"),
        None => warn!(path = %path.display(), "dataset not accessible, reporting unchanged"),
    }

    Ok(())
}

fn to_epoch_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
