//! In-memory tabular data model.

/// A single cell value.
///
/// CSV has no types, so cells are classified on read: blank fields become
/// [`Value::Missing`], numeric fields become [`Value::Number`], everything
/// else is text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Missing,
}

impl Value {
    /// Classifies a raw CSV field.
    #[must_use]
    pub fn from_csv_field(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            Self::Missing
        } else if let Ok(number) = trimmed.parse::<f64>() {
            Self::Number(number)
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Renders the value back into a CSV field.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{number:.0}")
                } else {
                    number.to_string()
                }
            }
            Self::Missing => String::new(),
        }
    }
}

/// An ordered sequence of records with a fixed column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Missing);
        self.rows.push(row);
    }

    /// Index of an exactly named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column rendered as text fields.
    #[must_use]
    pub fn column_fields(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(Value::to_field).unwrap_or_default())
            .collect()
    }

    /// Appends a column. The value vector must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, mut values: Vec<Value>) {
        values.resize(self.rows.len(), Value::Missing);
        self.columns.push(name.into());

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// A new table containing only the given columns, in the given order.
    #[must_use]
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let columns = indices
            .iter()
            .filter_map(|&i| self.columns.get(i).cloned())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Missing))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Keeps only the rows for which the predicate holds.
    pub fn retain_rows(&mut self, predicate: impl FnMut(&Vec<Value>) -> bool) {
        self.rows.retain(predicate);
    }

    /// Rewrites every value of one column.
    pub fn map_column(&mut self, index: usize, mut f: impl FnMut(&Value) -> Value) {
        for row in &mut self.rows {
            if let Some(value) = row.get_mut(index) {
                *value = f(value);
            }
        }
    }

    /// True when every field of the row is missing.
    #[must_use]
    pub fn row_is_empty(row: &[Value]) -> bool {
        row.iter().all(Value::is_missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_csv_fields() {
        assert_eq!(Value::from_csv_field("  "), Value::Missing);
        assert_eq!(Value::from_csv_field("42"), Value::Number(42.0));
        assert_eq!(Value::from_csv_field("3.5"), Value::Number(3.5));
        assert_eq!(
            Value::from_csv_field(" tela manchada "),
            Value::Text("tela manchada".to_string())
        );
    }

    #[test]
    fn renders_fields_back() {
        assert_eq!(Value::Number(42.0).to_field(), "42");
        assert_eq!(Value::Number(3.5).to_field(), "3.5");
        assert_eq!(Value::Missing.to_field(), "");
    }

    #[test]
    fn push_row_pads_short_rows() {
        let mut table = Table::new(vec!["A".into(), "B".into()]);
        table.push_row(vec![Value::Number(1.0)]);

        assert_eq!(table.rows()[0].len(), 2);
        assert!(table.rows()[0][1].is_missing());
    }

    #[test]
    fn select_columns_preserves_order() {
        let mut table = Table::new(vec!["A".into(), "B".into(), "C".into()]);
        table.push_row(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]);

        let selected = table.select_columns(&[2, 0]);
        assert_eq!(selected.columns(), ["C".to_string(), "A".to_string()]);
        assert_eq!(selected.rows()[0][0], Value::Number(3.0));
    }
}
