//! Text-classification model for defect categorization.
//!
//! This crate fits, persists and runs the classification pipeline: a TF-IDF
//! vectorizer over failure descriptions feeding a multinomial
//! logistic-regression classifier. Training produces two independently
//! loadable artifacts (fused pipeline + standalone vectorizer); the runtime
//! loads whichever shape is on disk and predicts categories in batch.

mod artifact;
mod classifier;
mod error;
mod runtime;
mod training;
mod vectorizer;

pub use artifact::{ModelArtifact, has_model, save_artifacts};
pub use classifier::{FitOptions, SoftmaxClassifier};
pub use error::ModelError;
pub use runtime::ClassifierRuntime;
pub use training::{TrainedModel, TrainingReport, train_model};
pub use vectorizer::{DEFAULT_MAX_FEATURES, TfidfVectorizer};
