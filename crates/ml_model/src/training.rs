//! Training pipeline: split, fit, evaluate, persist.

use config::Config;
use dataset::{ColumnRole, Table, resolve_column};
use tracing::{info, warn};

use crate::artifact::save_artifacts;
use crate::classifier::{FitOptions, SoftmaxClassifier};
use crate::error::ModelError;
use crate::vectorizer::{DEFAULT_MAX_FEATURES, TfidfVectorizer};

/// Fraction of usable rows that goes into the training split; the remainder
/// is held out for evaluation.
const TRAIN_FRACTION: f64 = 0.8;

/// Fixed seed so the split is reproducible across runs given the same rows
/// in the same order.
const SPLIT_SEED: u64 = 42;

/// Result of a completed training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub classifier: SoftmaxClassifier,
    pub vectorizer: TfidfVectorizer,
    pub report: TrainingReport,
}

/// Observability numbers from a training run. The accuracy is a signal, not
/// a gate: training succeeds regardless of the score.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Held-out accuracy; `None` when the dataset was too small to hold
    /// anything out.
    pub accuracy: Option<f64>,
    pub train_rows: usize,
    pub eval_rows: usize,
    pub classes: usize,
}

/// Fits the classification pipeline on a labeled dataset and persists both
/// artifacts.
///
/// Rows with a missing label or a missing/blank description are dropped
/// before the 80/20 split. Artifacts are only written after both fits
/// succeed.
///
/// # Errors
///
/// Returns [`ModelError::SchemaMissing`] when the description or label
/// column cannot be located, [`ModelError::EmptyTrainingSet`] when no usable
/// rows remain, and fit/persist errors otherwise.
pub fn train_model(base: &Table, config: &Config) -> Result<TrainedModel, ModelError> {
    let description = resolve_column(base.columns(), ColumnRole::FailureDescription)
        .ok_or(ModelError::SchemaMissing(ColumnRole::FailureDescription))?;
    let category = resolve_column(base.columns(), ColumnRole::Category)
        .ok_or(ModelError::SchemaMissing(ColumnRole::Category))?;

    let mut texts: Vec<String> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for row in base.rows() {
        let Some(label) = row.get(category) else {
            continue;
        };
        let Some(text) = row.get(description) else {
            continue;
        };

        if label.is_missing() {
            continue;
        }

        let text = text.to_field();
        if text.trim().is_empty() {
            continue;
        }

        texts.push(text);
        labels.push(label.to_field());
    }

    if texts.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    let dropped = base.n_rows() - texts.len();
    if dropped > 0 {
        info!(dropped, "dropped rows without label or description");
    }

    let (train_indices, eval_indices) = train_eval_split(texts.len(), TRAIN_FRACTION, SPLIT_SEED);

    let train_texts: Vec<String> = train_indices.iter().map(|&i| texts[i].clone()).collect();
    let train_labels: Vec<String> = train_indices.iter().map(|&i| labels[i].clone()).collect();

    info!(
        train_rows = train_texts.len(),
        eval_rows = eval_indices.len(),
        "fitting classification pipeline"
    );

    let mut vectorizer = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
    vectorizer.fit(&train_texts);

    let features = vectorizer.transform_batch(&train_texts);
    let classifier = SoftmaxClassifier::fit(&features, &train_labels, &FitOptions::default())?;

    let accuracy = if eval_indices.is_empty() {
        warn!("dataset too small to hold out an evaluation split");
        None
    } else {
        let eval_texts: Vec<String> = eval_indices.iter().map(|&i| texts[i].clone()).collect();
        let predicted = classifier.predict(&vectorizer.transform_batch(&eval_texts));

        let correct = predicted
            .iter()
            .zip(eval_indices.iter().map(|&i| &labels[i]))
            .filter(|(p, a)| p == a)
            .count();

        Some(correct as f64 / eval_indices.len() as f64)
    };

    if let Some(accuracy) = accuracy {
        info!("training complete, held-out accuracy {:.2}%", accuracy * 100.0);
    }

    save_artifacts(&classifier, &vectorizer, config)?;

    let report = TrainingReport {
        accuracy,
        train_rows: train_texts.len(),
        eval_rows: eval_indices.len(),
        classes: classifier.classes().len(),
    };

    Ok(TrainedModel {
        classifier,
        vectorizer,
        report,
    })
}

/// Splits `0..n` into train and evaluation index sets. The shuffle is a
/// seeded Fisher-Yates, so the same row count always yields the same split.
fn train_eval_split(n: usize, train_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    shuffle_indices(&mut indices, seed);

    let cut = ((n as f64) * train_fraction).round() as usize;
    let cut = cut.clamp(1, n);

    let eval = indices.split_off(cut);
    (indices, eval)
}

/// Fisher-Yates shuffle driven by an LCG, deterministic for a given seed.
fn shuffle_indices(indices: &mut [usize], seed: u64) {
    let mut rng_state = seed.wrapping_add(12345);

    for i in (1..indices.len()).rev() {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = ((rng_state >> 33) as usize) % (i + 1);
        indices.swap(i, j);
    }
}
