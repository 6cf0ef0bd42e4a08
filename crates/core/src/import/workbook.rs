//! Decoding of uploaded `.xlsx` / `.xls` workbooks into raw rows.
//!
//! Only the first sheet is read. Row 1 is the header and is dropped; every
//! later row keeps its position, so blank rows come through as empty
//! [`RawRow`]s and still consume a row number in the batch.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::Value;

use super::cell::{Cell, RawRow};
use crate::error::CoreError;

/// MIME types accepted for candidate uploads.
pub const EXCEL_MIME_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Rejection message for any other upload type.
pub const UPLOAD_NOT_EXCEL: &str = "Upload excel or xls file";

const HEADER_ROWS: usize = 1;

pub fn is_excel_mime(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    EXCEL_MIME_TYPES
        .iter()
        .any(|mime| mime.eq_ignore_ascii_case(essence))
}

/// Decode the first sheet of a workbook into data rows (header removed).
pub fn decode_workbook(bytes: Vec<u8>) -> Result<Vec<RawRow>, CoreError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| CoreError::Validation(format!("Unable to read workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::Validation("Workbook has no sheets".to_string()))?
        .map_err(|e| CoreError::Validation(format!("Unable to read first sheet: {e}")))?;

    // The used range may start below or right of A1.
    let Some((first_row, first_col)) = range.start() else {
        return Ok(Vec::new());
    };

    let leading = (0..first_row).map(|_| RawRow::default());
    let rows = leading
        .chain(range.rows().map(|cells| to_raw_row(first_col as usize, cells)))
        .skip(HEADER_ROWS)
        .collect::<Vec<_>>();

    tracing::debug!(rows = rows.len(), "Decoded candidate workbook");
    Ok(rows)
}

/// Pad to column A and drop trailing blanks, so a blank line is empty.
fn to_raw_row(offset: usize, cells: &[Data]) -> RawRow {
    let mut row: Vec<Cell> = std::iter::repeat_with(Cell::default)
        .take(offset)
        .chain(cells.iter().map(to_cell))
        .collect();
    while row.last().is_some_and(Cell::is_missing) {
        row.pop();
    }
    RawRow::new(row)
}

/// Dates stay as serial numbers, which is how the sheet stores them.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::Bool(b) => Cell::Other(Value::Bool(*b)),
        Data::Error(e) => Cell::Other(Value::String(e.to_string())),
    }
}
