//! Shared column-role resolution.
//!
//! Every component that needs "the failure description column" or "the
//! category column" resolves it here, against one alias table, instead of
//! keeping its own list of accepted header spellings.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A semantic role a dataset column can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Free-text description of the observed failure.
    FailureDescription,
    /// Defect category label.
    Category,
    /// Product model / reference identifier.
    ModelReference,
    /// Reported reason for the defect.
    Reason,
    /// Report date.
    Date,
}

impl ColumnRole {
    /// Accepted normalized header names for this role, in priority order.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::FailureDescription => {
                &["DESCRICAO_DA_FALHA", "DESC_FALHA", "DESC._FALHA", "DESCRICAO"]
            }
            Self::Category => &["CATEGORIA"],
            Self::ModelReference => &["MODELO", "REFERENCIA"],
            Self::Reason => &["MOTIVO"],
            Self::Date => &["DATA"],
        }
    }

    /// Human-readable role name for warnings and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FailureDescription => "failure description",
            Self::Category => "category",
            Self::ModelReference => "model/reference",
            Self::Reason => "reason",
            Self::Date => "date",
        }
    }
}

/// Columns that carry free text and go through the text normalizer.
pub(crate) const FREE_TEXT_COLUMNS: &[&str] = &[
    "DESCRICAO",
    "DESCRICAO_DA_FALHA",
    "DESC_FALHA",
    "DESC._FALHA",
    "DESC_COMPONENTE",
    "DESC._COMPONENTE",
    "ANALISE",
];

/// Label-like columns that are standardized to trimmed upper-case.
pub(crate) const LABEL_COLUMNS: &[&str] = &["CATEGORIA", "MOTIVO"];

/// Roles a dataset is expected to provide. Absence is a warning, not an
/// error: loading succeeds with a reduced schema.
const EXPECTED_ROLES: &[ColumnRole] = &[
    ColumnRole::FailureDescription,
    ColumnRole::Category,
    ColumnRole::ModelReference,
];

/// Rewrites a raw header into its canonical form: trimmed, upper-cased,
/// diacritics stripped, spaces replaced with underscores.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect::<String>()
        .to_uppercase()
        .replace(' ', "_")
}

/// Resolves a role to a column index by scanning the alias list in order.
/// Column names are expected to be normalized already.
#[must_use]
pub fn resolve_column(columns: &[String], role: ColumnRole) -> Option<usize> {
    role.aliases()
        .iter()
        .find_map(|alias| columns.iter().position(|c| c == alias))
}

/// Finds a description-like column by substring match, the looser lookup the
/// logger uses for records whose exact header is not known in advance.
#[must_use]
pub fn find_description_column(columns: &[String]) -> Option<usize> {
    columns
        .iter()
        .position(|c| normalize_header(c).contains("DESC"))
}

/// Labels of expected roles that no column of the table fills.
#[must_use]
pub fn missing_expected_columns(columns: &[String]) -> Vec<&'static str> {
    EXPECTED_ROLES
        .iter()
        .filter(|role| resolve_column(columns, **role).is_none())
        .map(|role| role.label())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_accented_headers() {
        assert_eq!(normalize_header("Descrição da Falha"), "DESCRICAO_DA_FALHA");
        assert_eq!(normalize_header("  Categoria "), "CATEGORIA");
        assert_eq!(normalize_header("Desc. Falha"), "DESC._FALHA");
    }

    #[test]
    fn resolves_roles_in_alias_priority_order() {
        let columns = vec!["DESCRICAO".to_string(), "DESC_FALHA".to_string()];
        assert_eq!(
            resolve_column(&columns, ColumnRole::FailureDescription),
            Some(1)
        );

        let columns = vec!["CATEGORIA".to_string()];
        assert_eq!(resolve_column(&columns, ColumnRole::Category), Some(0));
        assert_eq!(resolve_column(&columns, ColumnRole::Date), None);
    }

    #[test]
    fn finds_description_like_columns_by_substring() {
        let columns = vec!["MODELO".to_string(), "DESC._COMPONENTE".to_string()];
        assert_eq!(find_description_column(&columns), Some(1));

        let columns = vec!["MODELO".to_string()];
        assert_eq!(find_description_column(&columns), None);
    }

    #[test]
    fn reports_missing_expected_roles() {
        let columns = vec!["DESCRICAO".to_string()];
        let missing = missing_expected_columns(&columns);
        assert_eq!(missing, vec!["category", "model/reference"]);
    }
}
