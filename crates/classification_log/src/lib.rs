//! Classification history log.
//!
//! Newly classified records are stamped with the classification time,
//! merged with the on-disk history, deduplicated and pruned to the retention
//! horizon, then the log file is rewritten wholesale. A failed log write is
//! the caller's cue to warn, never to discard predictions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDateTime};
use config::Config;
use dataset::{Table, Value, find_description_column};
use thiserror::Error;
use tracing::{info, warn};

/// Column holding the classification timestamp.
pub const DATA_LOG_COLUMN: &str = "DATA_LOG";

/// Column holding the predicted category.
pub const PREDICTED_CATEGORY_COLUMN: &str = "CATEGORIA_PREDITA";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LogError {
    /// Fewer than two columns is not a meaningful record.
    #[error("records need at least two columns to be logged, got {0}")]
    TooFewColumns(usize),

    /// No description-like column could be located in the records.
    #[error("no description column found in the records to be logged")]
    NoDescriptionColumn,

    /// The merged log could not be persisted.
    #[error("failed to write classification log '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Counts reported after a log update.
#[derive(Debug, Clone, Copy)]
pub struct LogSummary {
    /// Newly appended records.
    pub appended: usize,
    /// Entries purged for being older than the retention horizon.
    pub purged: usize,
    /// Entries in the log after the rewrite.
    pub retained: usize,
}

/// Appends newly classified records to the history log.
///
/// # Errors
///
/// Returns [`LogError::TooFewColumns`] or [`LogError::NoDescriptionColumn`]
/// when the records cannot be logged meaningfully (nothing is written), and
/// [`LogError::Write`] when the rewrite fails.
pub fn log_classifications(records: &Table, config: &Config) -> Result<LogSummary, LogError> {
    log_classifications_at(records, config, Local::now().naive_local())
}

/// Same as [`log_classifications`], with an explicit clock.
pub fn log_classifications_at(
    records: &Table,
    config: &Config,
    now: NaiveDateTime,
) -> Result<LogSummary, LogError> {
    if records.n_columns() < 2 {
        return Err(LogError::TooFewColumns(records.n_columns()));
    }

    let description = find_description_column(records.columns())
        .ok_or(LogError::NoDescriptionColumn)?;
    let description_name = records.columns()[description].clone();

    // Stamp every new record with the classification time.
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let mut stamped = records.clone();
    stamped.push_column(
        DATA_LOG_COLUMN,
        vec![Value::Text(timestamp); records.n_rows()],
    );

    let mut merged = match read_existing_log(&config.log_path) {
        ExistingLog::Missing => stamped,
        ExistingLog::Readable(existing) => concat_tables(existing, stamped),
        ExistingLog::Corrupt => stamped,
    };

    deduplicate(&mut merged, &description_name);

    let purged = purge_expired(&mut merged, now - Duration::days(config.retention_days));
    if purged > 0 {
        info!(
            purged,
            retention_days = config.retention_days,
            "purged log entries older than the retention horizon"
        );
    }

    write_log(&merged, &config.log_path)?;

    info!(
        retained = merged.n_rows(),
        path = %config.log_path.display(),
        "classification log updated"
    );

    Ok(LogSummary {
        appended: records.n_rows(),
        purged,
        retained: merged.n_rows(),
    })
}

enum ExistingLog {
    Missing,
    Readable(Table),
    Corrupt,
}

/// Reads the on-disk log. An unreadable log is archived to a `.corrupt`
/// sibling and the caller starts a fresh log from the new entries.
fn read_existing_log(path: &Path) -> ExistingLog {
    if !path.exists() {
        return ExistingLog::Missing;
    }

    match parse_log(path) {
        Ok(table) => ExistingLog::Readable(table),
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "existing classification log is unreadable, archiving it and starting fresh"
            );

            let archive = path.with_extension("csv.corrupt");
            if let Err(error) = std::fs::rename(path, &archive) {
                warn!(%error, "could not archive the unreadable log");
            } else {
                warn!(archive = %archive.display(), "unreadable log archived");
            }

            ExistingLog::Corrupt
        }
    }
}

fn parse_log(path: &Path) -> Result<Table, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(Value::from_csv_field).collect());
    }

    Ok(table)
}

/// Concatenates two tables over the union of their columns, first table's
/// rows first. Cells absent from a source table come back missing.
fn concat_tables(first: Table, second: Table) -> Table {
    let mut columns: Vec<String> = first.columns().to_vec();
    for name in second.columns() {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.clone());
        }
    }

    let mut merged = Table::new(columns);
    append_aligned(&mut merged, &first);
    append_aligned(&mut merged, &second);
    merged
}

fn append_aligned(target: &mut Table, source: &Table) {
    let indices: Vec<Option<usize>> = target
        .columns()
        .iter()
        .map(|name| source.column_index(name))
        .collect();

    for row in source.rows() {
        let aligned = indices
            .iter()
            .map(|index| {
                index
                    .and_then(|i| row.get(i).cloned())
                    .unwrap_or(Value::Missing)
            })
            .collect();
        target.push_row(aligned);
    }
}

/// Drops rows sharing the (description, predicted category, timestamp)
/// triple, keeping the most recently written duplicate.
fn deduplicate(table: &mut Table, description_name: &str) {
    let description = table.column_index(description_name);
    let category = table.column_index(PREDICTED_CATEGORY_COLUMN);
    let data_log = table.column_index(DATA_LOG_COLUMN);

    let field = |row: &[Value], index: Option<usize>| -> String {
        index
            .and_then(|i| row.get(i))
            .map(Value::to_field)
            .unwrap_or_default()
    };

    let keys: Vec<(String, String, String)> = table
        .rows()
        .iter()
        .map(|row| {
            (
                field(row, description),
                field(row, category),
                field(row, data_log),
            )
        })
        .collect();

    let mut last_occurrence: HashMap<&(String, String, String), usize> = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        last_occurrence.insert(key, i);
    }

    let mut index = 0;
    table.retain_rows(|_| {
        let keep = last_occurrence[&keys[index]] == index;
        index += 1;
        keep
    });
}

/// Drops entries strictly older than the horizon. Entries whose timestamp
/// does not parse are treated as expired.
fn purge_expired(table: &mut Table, horizon: NaiveDateTime) -> usize {
    let Some(data_log) = table.column_index(DATA_LOG_COLUMN) else {
        return 0;
    };

    let before = table.n_rows();

    let keep: Vec<bool> = table
        .rows()
        .iter()
        .map(|row| {
            row.get(data_log)
                .map(Value::to_field)
                .and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok())
                .is_some_and(|timestamp| timestamp >= horizon)
        })
        .collect();

    let mut index = 0;
    table.retain_rows(|_| {
        let retain = keep[index];
        index += 1;
        retain
    });

    before - table.n_rows()
}

fn write_log(table: &Table, path: &Path) -> Result<(), LogError> {
    let write_error = |source: Box<dyn std::error::Error + Send + Sync>| LogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| write_error(Box::new(e)))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(Box::new(e)))?;

    writer
        .write_record(table.columns())
        .map_err(|e| write_error(Box::new(e)))?;

    for row in table.rows() {
        let fields: Vec<String> = row.iter().map(Value::to_field).collect();
        writer
            .write_record(&fields)
            .map_err(|e| write_error(Box::new(e)))?;
    }

    writer.flush().map_err(|e| write_error(Box::new(e)))?;
    Ok(())
}
