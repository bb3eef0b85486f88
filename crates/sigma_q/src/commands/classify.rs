//! Classify command - one full pass: load, predict, log.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use classification_log::{PREDICTED_CATEGORY_COLUMN, log_classifications};
use config::Config;
use dataset::{ColumnRole, Value, resolve_column};
use ml_model::ClassifierRuntime;
use tracing::{info, warn};

/// Runs the classify command.
///
/// Trains automatically when no persisted model exists yet. Logging failures
/// are downgraded to warnings: predictions that were already computed are
/// never discarded because the log could not be written.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, the model is
/// unavailable, or no failure-description column exists.
pub fn run(config: &Config, path: Option<&Path>) -> Result<()> {
    let mut table = dataset::load_dataset(path, None, config)
        .context("could not load the quality-control dataset")?;

    if !ml_model::has_model(config) {
        info!("no trained model found, training automatically");
        super::train::run(config)?;
    }

    let runtime =
        ClassifierRuntime::load(config).context("could not load the classification model")?;

    let Some(description) = resolve_column(table.columns(), ColumnRole::FailureDescription) else {
        bail!("no failure-description column found for automatic classification");
    };

    let texts = table.column_fields(description);
    info!(records = texts.len(), "classifying failure descriptions");

    let predictions = runtime.predict(&texts);
    report_category_counts(&predictions);

    let values: Vec<Value> = predictions.into_iter().map(Value::Text).collect();
    table.push_column(PREDICTED_CATEGORY_COLUMN, values);

    let records = table.select_columns(&[description, table.n_columns() - 1]);

    match log_classifications(&records, config) {
        Ok(summary) => info!(
            appended = summary.appended,
            purged = summary.purged,
            retained = summary.retained,
            "classification log updated"
        ),
        Err(error) => warn!(%error, "could not update the classification log"),
    }

    Ok(())
}

/// Reports how many records landed in each predicted category, largest
/// categories first.
fn report_category_counts(predictions: &[String]) {
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for category in predictions {
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    for (category, count) in ranked.into_iter().take(10) {
        info!(category = %category, count, "predicted category");
    }
}
