//! Model training and runtime errors.

use std::path::PathBuf;

use dataset::ColumnRole;
use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The training base lacks a column for a required role. Fatal for
    /// training and classification, unlike the loader's non-fatal warning.
    #[error("no column matching the {} role found in the dataset", .0.label())]
    SchemaMissing(ColumnRole),

    /// Every row was dropped for having a missing label or blank description.
    #[error("no usable training rows after dropping unlabeled or blank examples")]
    EmptyTrainingSet,

    /// The fit itself failed.
    #[error("training failed: {0}")]
    Training(String),

    /// Prediction was requested but a persisted artifact is absent.
    #[error("no trained model available: '{}' is missing", .0.display())]
    Unavailable(PathBuf),

    #[error("failed to read model artifact '{}'", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    #[error("failed to persist model artifact '{}'", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: Cause,
    },
}
