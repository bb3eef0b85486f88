//! Dataset loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// The resolved dataset path does not exist.
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be parsed as tabular data.
    #[error("failed to parse dataset '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two distinct headers normalize to the same column name.
    #[error("columns '{first}' and '{second}' both normalize to '{normalized}'")]
    ColumnCollision {
        first: String,
        second: String,
        normalized: String,
    },
}
