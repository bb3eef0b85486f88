//! Persisted model artifacts.
//!
//! Training writes two independently loadable JSON blobs: the fused
//! classification pipeline and the standalone fitted vectorizer. Absence of
//! either file means "no model available".

use std::fs;
use std::path::Path;

use config::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::SoftmaxClassifier;
use crate::error::ModelError;
use crate::vectorizer::TfidfVectorizer;

/// On-disk shape of the classification model.
///
/// A `Pipeline` carries its own vectorizer and predicts straight from text;
/// a bare `Classifier` needs the standalone vectorizer artifact for explicit
/// vectorization. The runtime decides which path to take once, at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Pipeline {
        vectorizer: TfidfVectorizer,
        classifier: SoftmaxClassifier,
    },
    Classifier {
        classifier: SoftmaxClassifier,
    },
}

impl ModelArtifact {
    /// Whether this artifact can predict directly from raw text.
    #[must_use]
    pub const fn predicts_text(&self) -> bool {
        matches!(self, Self::Pipeline { .. })
    }
}

/// Reports whether both persisted artifacts exist.
#[must_use]
pub fn has_model(config: &Config) -> bool {
    config.model_path.exists() && config.vectorizer_path.exists()
}

/// Persists the fitted pipeline and the standalone vectorizer, overwriting
/// any prior artifacts. Each file is written to a temporary sibling and then
/// renamed into place; a failed write never leaves a half-written artifact.
///
/// # Errors
///
/// Returns [`ModelError::Persist`] when a directory or file write fails.
pub fn save_artifacts(
    classifier: &SoftmaxClassifier,
    vectorizer: &TfidfVectorizer,
    config: &Config,
) -> Result<(), ModelError> {
    let pipeline = ModelArtifact::Pipeline {
        vectorizer: vectorizer.clone(),
        classifier: classifier.clone(),
    };

    write_json(&config.model_path, &pipeline)?;
    write_json(&config.vectorizer_path, vectorizer)?;

    info!(
        model = %config.model_path.display(),
        vectorizer = %config.vectorizer_path.display(),
        "model artifacts saved"
    );

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ModelError> {
    let persist = |source: Box<dyn std::error::Error + Send + Sync>| ModelError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| persist(Box::new(e)))?;
    }

    let json = serde_json::to_vec(value).map_err(|e| persist(Box::new(e)))?;

    let temp = path.with_extension("tmp");
    fs::write(&temp, json).map_err(|e| persist(Box::new(e)))?;
    fs::rename(&temp, path).map_err(|e| persist(Box::new(e)))?;

    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    if !path.exists() {
        return Err(ModelError::Unavailable(path.to_path_buf()));
    }

    let load = |source: Box<dyn std::error::Error + Send + Sync>| ModelError::Load {
        path: path.to_path_buf(),
        source,
    };

    let data = fs::read(path).map_err(|e| load(Box::new(e)))?;
    serde_json::from_slice(&data).map_err(|e| load(Box::new(e)))
}
