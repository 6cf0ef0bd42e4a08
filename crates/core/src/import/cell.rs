//! Raw spreadsheet cells and rows.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::columns::{Column, Layout};

/// A single decoded spreadsheet cell.
///
/// Spreadsheet decoders emit strings and numbers; blank cells come through
/// as `null` or as holes past the last filled column. Anything else
/// (booleans, nested arrays or objects) is kept as `Other` so that it is
/// reported as the wrong type rather than silently ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Other(Value),
}

static MISSING: Cell = Cell::Missing;

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Other(Value::Number(n)),
            },
            other => Self::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Cell::from)
    }
}

/// One spreadsheet row. Positions are only ever read through a [`Layout`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRow(Vec<Cell>);

impl RawRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Zero-length rows are skipped by the importer.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The cell holding `column` under `layout`. Columns outside the layout
    /// and positions past the end of the row read as [`Cell::Missing`].
    pub fn cell(&self, layout: &Layout, column: Column) -> &Cell {
        layout
            .position(column)
            .and_then(|index| self.0.get(index))
            .unwrap_or(&MISSING)
    }
}
