//! Timestamp-based change detection for the dataset file.

use std::path::Path;
use std::time::SystemTime;

/// Compares the file's current modification time against a previously
/// observed one and reports whether the dataset must be reloaded.
///
/// The first observation (no prior timestamp) is never a change; it only
/// establishes the baseline. An inaccessible path reports unchanged with no
/// timestamp: this is an advisory liveness check, not a correctness-critical
/// read.
#[must_use]
pub fn monitor_dataset(
    path: &Path,
    last_modified: Option<SystemTime>,
) -> (bool, Option<SystemTime>) {
    let Ok(metadata) = std::fs::metadata(path) else {
        return (false, None);
    };
    let Ok(modified) = metadata.modified() else {
        return (false, None);
    };

    match last_modified {
        None => (false, Some(modified)),
        Some(previous) => (modified != previous, Some(modified)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn first_observation_is_never_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();

        let (changed, modified) = monitor_dataset(&path, None);
        assert!(!changed);
        assert!(modified.is_some());
    }

    #[test]
    fn newer_modification_time_reports_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();

        let (_, baseline) = monitor_dataset(&path, None);
        let earlier = baseline.unwrap() - Duration::from_secs(10);

        let (changed, modified) = monitor_dataset(&path, Some(earlier));
        assert!(changed);
        assert_eq!(modified, baseline);
    }

    #[test]
    fn unchanged_file_reports_no_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();

        let (_, baseline) = monitor_dataset(&path, None);
        let (changed, _) = monitor_dataset(&path, baseline);
        assert!(!changed);
    }

    #[test]
    fn missing_file_reports_unchanged_without_timestamp() {
        let (changed, modified) = monitor_dataset(Path::new("does/not/exist.csv"), None);
        assert!(!changed);
        assert!(modified.is_none());
    }
}
