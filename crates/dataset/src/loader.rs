//! Dataset loading and cleanup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::Config;
use tracing::{info, warn};

use crate::columns::{
    FREE_TEXT_COLUMNS, LABEL_COLUMNS, missing_expected_columns, normalize_header,
};
use crate::error::DatasetError;
use crate::table::{Table, Value};

/// Loads the tabular dataset at `path` (or the configured default), returning
/// a cleaned [`Table`].
///
/// Headers are rewritten to their canonical form, fully-empty rows are
/// dropped, free-text columns go through the text normalizer and label-like
/// columns are standardized to upper-case. When `columns` is given, only the
/// named columns are kept.
///
/// Missing expected columns (failure description, category, model/reference)
/// are logged as a warning; loading still succeeds with the reduced schema.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] when the resolved path does not exist,
/// [`DatasetError::Parse`] on malformed content and
/// [`DatasetError::ColumnCollision`] when two headers normalize to the same
/// name.
pub fn load_dataset(
    path: Option<&Path>,
    columns: Option<&[String]>,
    config: &Config,
) -> Result<Table, DatasetError> {
    let resolved = resolve_path(path, config);

    if !resolved.exists() {
        return Err(DatasetError::NotFound(resolved));
    }

    let mut table = parse_csv(&resolved)?;

    if let Some(requested) = columns {
        table = select_requested_columns(&table, requested);
    }

    table.retain_rows(|row| !Table::row_is_empty(row));

    clean_text_columns(&mut table);

    let missing = missing_expected_columns(table.columns());
    if !missing.is_empty() {
        warn!(?missing, "expected columns not found in dataset");
    }

    info!(
        path = %resolved.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "dataset loaded"
    );

    Ok(table)
}

/// Resolves the dataset path: an explicit path wins, otherwise the configured
/// file, falling back to the same file name at the project root.
fn resolve_path(path: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }

    let primary = config.dataset_path.clone();
    if primary.exists() {
        return primary;
    }

    if let Some(name) = primary.file_name() {
        let fallback = PathBuf::from(name);
        if fallback.exists() {
            return fallback;
        }
    }

    primary
}

fn parse_error(path: &Path, source: csv::Error) -> DatasetError {
    DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_csv(path: &Path) -> Result<Table, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| parse_error(path, e))?;

    let headers = reader.headers().map_err(|e| parse_error(path, e))?.clone();

    let mut normalized: Vec<String> = Vec::with_capacity(headers.len());
    let mut seen: HashMap<String, String> = HashMap::new();

    for raw in headers.iter() {
        let name = normalize_header(raw);

        if let Some(first) = seen.get(&name) {
            return Err(DatasetError::ColumnCollision {
                first: first.clone(),
                second: raw.to_string(),
                normalized: name,
            });
        }

        seen.insert(name.clone(), raw.to_string());
        normalized.push(name);
    }

    let mut table = Table::new(normalized);

    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, e))?;
        table.push_row(record.iter().map(Value::from_csv_field).collect());
    }

    Ok(table)
}

/// Keeps only the requested columns. Unknown names are skipped with a
/// warning; loading proceeds with whatever subset exists.
fn select_requested_columns(table: &Table, requested: &[String]) -> Table {
    let mut indices = Vec::new();
    let mut unknown = Vec::new();

    for name in requested {
        let normalized = normalize_header(name);
        match table.column_index(&normalized) {
            Some(index) => indices.push(index),
            None => unknown.push(normalized),
        }
    }

    if !unknown.is_empty() {
        warn!(?unknown, "requested columns not present in dataset");
    }

    table.select_columns(&indices)
}

/// Applies the text normalizer to free-text columns and standardizes
/// label-like columns to trimmed upper-case. Non-text values pass through
/// untouched.
fn clean_text_columns(table: &mut Table) {
    for index in 0..table.n_columns() {
        let name = table.columns()[index].clone();

        if FREE_TEXT_COLUMNS.contains(&name.as_str()) {
            table.map_column(index, |value| match value {
                Value::Text(text) => Value::Text(text_normalizer::normalize(text)),
                other => other.clone(),
            });
        } else if LABEL_COLUMNS.contains(&name.as_str()) {
            table.map_column(index, |value| match value {
                Value::Text(text) => Value::Text(text.trim().to_uppercase()),
                other => other.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn test_config(dataset_path: PathBuf) -> Config {
        Config {
            dataset_path,
            ..Config::default()
        }
    }

    #[test]
    fn normalizes_headers_and_drops_empty_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "base.csv",
            "Descrição da Falha,Categoria\nAlto falante QEIMADO,queimado\n,\nSem blutooth,conectividade\n",
        );

        let config = test_config(path);
        let table = load_dataset(None, None, &config).unwrap();

        assert_eq!(
            table.columns(),
            ["DESCRICAO_DA_FALHA".to_string(), "CATEGORIA".to_string()]
        );
        assert_eq!(table.n_rows(), 2);

        for name in table.columns() {
            assert!(name.is_ascii(), "header {name:?} still carries accents");
            assert!(!name.contains(' '), "header {name:?} still carries spaces");
        }
    }

    #[test]
    fn applies_text_normalizer_to_description_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "base.csv",
            "Descrição da Falha,Categoria\nalto falante qeimado qeimado,queimado\n",
        );

        let table = load_dataset(Some(&path), None, &Config::default()).unwrap();

        assert_eq!(
            table.rows()[0][0],
            Value::Text("alto falante queimado".to_string())
        );
        // Label columns are standardized to upper-case.
        assert_eq!(table.rows()[0][1], Value::Text("QUEIMADO".to_string()));
    }

    #[test]
    fn missing_file_is_a_not_found_error() {
        let config = test_config(PathBuf::from("nowhere/base.csv"));
        let error = load_dataset(None, None, &config).unwrap_err();
        assert!(matches!(error, DatasetError::NotFound(_)));
    }

    #[test]
    fn colliding_headers_fail_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "base.csv",
            "Descrição,DESCRICAO\nfalha na tela,falha na tela\n",
        );

        let error = load_dataset(Some(&path), None, &Config::default()).unwrap_err();
        assert!(matches!(error, DatasetError::ColumnCollision { .. }));
    }

    #[test]
    fn loads_only_the_requested_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "base.csv",
            "Descrição da Falha,Categoria,Modelo\nsem imagem,display,XT-500\n",
        );

        let requested = vec!["categoria".to_string(), "inexistente".to_string()];
        let table = load_dataset(Some(&path), Some(&requested), &Config::default()).unwrap();

        assert_eq!(table.columns(), ["CATEGORIA".to_string()]);
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn loading_succeeds_without_expected_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "base.csv", "Serial,Linha\n123,A\n");

        let table = load_dataset(Some(&path), None, &Config::default()).unwrap();
        assert_eq!(table.n_rows(), 1);
    }
}
