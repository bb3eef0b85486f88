//! Batch prediction over persisted artifacts.

use config::Config;
use tracing::debug;

use crate::artifact::{ModelArtifact, read_json};
use crate::classifier::SoftmaxClassifier;
use crate::error::ModelError;
use crate::vectorizer::TfidfVectorizer;

/// A loaded classification pipeline, ready to predict in batch.
///
/// Artifacts are loaded once per runtime and reused for every prediction.
pub struct ClassifierRuntime {
    pipeline: Pipeline,
}

/// Resolved artifact shape, decided once at load time.
enum Pipeline {
    /// Fused artifact: predicts straight from text.
    Fused {
        vectorizer: TfidfVectorizer,
        classifier: SoftmaxClassifier,
    },
    /// Bare classifier plus the standalone vectorizer: text is vectorized
    /// explicitly, then classified.
    Split {
        vectorizer: TfidfVectorizer,
        classifier: SoftmaxClassifier,
    },
}

impl ClassifierRuntime {
    /// Loads the persisted artifacts. Refuses to construct a runtime when
    /// either required artifact file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Unavailable`] when an artifact is missing and
    /// [`ModelError::Load`] when one cannot be deserialized.
    pub fn load(config: &Config) -> Result<Self, ModelError> {
        if !config.model_path.exists() {
            return Err(ModelError::Unavailable(config.model_path.clone()));
        }
        if !config.vectorizer_path.exists() {
            return Err(ModelError::Unavailable(config.vectorizer_path.clone()));
        }

        let artifact: ModelArtifact = read_json(&config.model_path)?;

        let pipeline = match artifact {
            ModelArtifact::Pipeline {
                vectorizer,
                classifier,
            } => {
                debug!("loaded fused pipeline artifact");
                Pipeline::Fused {
                    vectorizer,
                    classifier,
                }
            }
            ModelArtifact::Classifier { classifier } => {
                debug!("loaded bare classifier artifact, using standalone vectorizer");
                let vectorizer: TfidfVectorizer = read_json(&config.vectorizer_path)?;
                Pipeline::Split {
                    vectorizer,
                    classifier,
                }
            }
        };

        Ok(Self { pipeline })
    }

    /// Predicts one category per input text, preserving order and batch size.
    #[must_use]
    pub fn predict(&self, texts: &[String]) -> Vec<String> {
        match &self.pipeline {
            Pipeline::Fused {
                vectorizer,
                classifier,
            }
            | Pipeline::Split {
                vectorizer,
                classifier,
            } => classifier.predict(&vectorizer.transform_batch(texts)),
        }
    }
}
