//! Multinomial logistic-regression classifier over dense feature vectors.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Gradient-descent settings for [`SoftmaxClassifier::fit`].
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub learning_rate: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Linear classifier with a softmax output over the label set.
///
/// Weights are stored as plain vectors so the fitted model serializes
/// directly into the persisted artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl SoftmaxClassifier {
    /// Fits the classifier with batch gradient descent, stopping early once
    /// the weight update falls below the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Training`] when the inputs are empty or
    /// features and labels disagree in length.
    pub fn fit(
        features: &Array2<f64>,
        labels: &[String],
        options: &FitOptions,
    ) -> Result<Self, ModelError> {
        let n_samples = features.nrows();
        let n_features = features.ncols();

        if n_samples == 0 || labels.is_empty() {
            return Err(ModelError::Training(
                "cannot fit a classifier on an empty training set".to_string(),
            ));
        }
        if n_samples != labels.len() {
            return Err(ModelError::Training(format!(
                "feature rows ({n_samples}) and labels ({}) disagree",
                labels.len()
            )));
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        let n_classes = classes.len();

        let mut y_onehot = Array2::<f64>::zeros((n_samples, n_classes));
        for (i, label) in labels.iter().enumerate() {
            if let Ok(class) = classes.binary_search(label) {
                y_onehot[[i, class]] = 1.0;
            }
        }

        let mut weights = Array2::<f64>::zeros((n_classes, n_features));
        let mut intercepts = Array1::<f64>::zeros(n_classes);

        for _ in 0..options.max_iter {
            let weights_old = weights.clone();

            let mut proba = features.dot(&weights.t());
            for mut row in proba.rows_mut() {
                row += &intercepts;
                softmax_in_place(&mut row);
            }

            let errors = &proba - &y_onehot;
            let grad_w = errors.t().dot(features) / n_samples as f64;
            let grad_b = errors.sum_axis(Axis(0)) / n_samples as f64;

            weights = &weights - &(grad_w * options.learning_rate);
            intercepts = &intercepts - &(grad_b * options.learning_rate);

            let update: f64 = (&weights - &weights_old).iter().map(|w| w.abs()).sum();
            if update < options.tolerance {
                break;
            }
        }

        Ok(Self {
            classes,
            weights: weights.rows().into_iter().map(|r| r.to_vec()).collect(),
            intercepts: intercepts.to_vec(),
        })
    }

    /// Predicts one class label per feature row, preserving order.
    #[must_use]
    pub fn predict(&self, features: &Array2<f64>) -> Vec<String> {
        let weights = self.weights_matrix();
        let scores = features.dot(&weights.t());

        scores
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                let mut best_score = f64::NEG_INFINITY;

                for (class, &score) in row.iter().enumerate() {
                    let score = score + self.intercepts.get(class).copied().unwrap_or(0.0);
                    if score > best_score {
                        best_score = score;
                        best = class;
                    }
                }

                self.classes[best].clone()
            })
            .collect()
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn weights_matrix(&self) -> Array2<f64> {
        let n_features = self.weights.first().map_or(0, Vec::len);
        let mut matrix = Array2::zeros((self.weights.len(), n_features));

        for (i, row) in self.weights.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }

        matrix
    }
}

/// Numerically stable softmax over one score row.
fn softmax_in_place(row: &mut ndarray::ArrayViewMut1<f64>) {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    row.mapv_inplace(|z| (z - max).exp());
    let sum = row.sum();

    if sum > 0.0 {
        row.mapv_inplace(|z| z / sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn fits_linearly_separable_classes() {
        let features = Array2::from_shape_vec(
            (6, 2),
            vec![1.0, 0.0, 0.9, 0.1, 1.0, 0.1, 0.0, 1.0, 0.1, 0.9, 0.1, 1.0],
        )
        .unwrap();
        let y = labels(&[
            "QUEIMADO",
            "QUEIMADO",
            "QUEIMADO",
            "DISPLAY",
            "DISPLAY",
            "DISPLAY",
        ]);

        let model = SoftmaxClassifier::fit(&features, &y, &FitOptions::default()).unwrap();
        let predicted = model.predict(&features);

        assert_eq!(predicted, y);
        assert_eq!(model.classes(), ["DISPLAY".to_string(), "QUEIMADO".to_string()]);
    }

    #[test]
    fn single_class_always_wins() {
        let features = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let y = labels(&["UNICA", "UNICA"]);

        let model = SoftmaxClassifier::fit(&features, &y, &FitOptions::default()).unwrap();
        let predicted = model.predict(&features);

        assert_eq!(predicted, labels(&["UNICA", "UNICA"]));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let features = Array2::<f64>::zeros((0, 3));
        let result = SoftmaxClassifier::fit(&features, &[], &FitOptions::default());
        assert!(matches!(result, Err(ModelError::Training(_))));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let features = Array2::<f64>::zeros((2, 3));
        let result = SoftmaxClassifier::fit(&features, &labels(&["A"]), &FitOptions::default());
        assert!(matches!(result, Err(ModelError::Training(_))));
    }
}
