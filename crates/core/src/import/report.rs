//! Column errors, row error descriptors and the batch outcome.

use indexmap::IndexMap;
use serde::Serialize;

use super::columns::Column;
use super::draft::CandidateDraft;

/// Column errors of one row, keyed by column label in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnErrors(IndexMap<&'static str, String>);

impl ColumnErrors {
    /// Record `message` for `column`, replacing an earlier message for the
    /// same column.
    pub fn push(&mut self, column: Column, message: impl Into<String>) {
        self.0.insert(column.label(), message.into());
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.0.get(column.label()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_row_error(self, row: usize) -> RowError {
        RowError {
            messages: self.0,
            row,
        }
    }
}

/// Errors of one rejected row, serialised flat:
/// `{ "Name": "Name is required", "row": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    #[serde(flatten)]
    pub messages: IndexMap<&'static str, String>,
    /// 1-based spreadsheet row number.
    pub row: usize,
}

impl RowError {
    pub fn message(&self, column: Column) -> Option<&str> {
        self.messages.get(column.label()).map(String::as_str)
    }
}

/// Partitioned result of an import batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Drafts ready to be submitted to the candidate service.
    pub data: Vec<CandidateDraft>,
    /// One descriptor per rejected row, in row order.
    pub error_message: Vec<RowError>,
}

impl ImportOutcome {
    /// Whether the caller can commit without showing an error dialog.
    pub fn is_clean(&self) -> bool {
        self.error_message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_error_serializes_flat_in_column_order() {
        let mut errors = ColumnErrors::default();
        errors.push(Column::Name, "Name is required");
        errors.push(Column::JobTitle, "Job Title is required");
        let value = serde_json::to_value(errors.into_row_error(3)).unwrap();
        assert_eq!(
            value,
            json!({
                "Name": "Name is required",
                "Job Title": "Job Title is required",
                "row": 3
            })
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn later_message_for_same_column_wins() {
        let mut errors = ColumnErrors::default();
        errors.push(Column::JobTitle, "first");
        errors.push(Column::JobTitle, "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Column::JobTitle), Some("second"));
    }

    #[test]
    fn outcome_uses_error_message_key() {
        let outcome = ImportOutcome::default();
        assert!(outcome.is_clean());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "data": [], "errorMessage": [] })
        );
    }
}
