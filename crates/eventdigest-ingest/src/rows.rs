//! Row reconstruction from per-field sequences.
//!
//! Wide exports arrive as one array per column. [`FieldSequences`] holds the
//! coerced column for every logical field, and [`reconstruct_rows`] zips
//! them back together by position. Columns do not need matching lengths:
//! the row count is the longest column, and shorter columns read as absent
//! past their end.

use serde_json::Value;

use crate::coerce::coerce_sequence;
use crate::fields::{Field, resolve_field};
use crate::record::RawRecord;

/// The coerced sequence of every logical field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSequences {
    columns: [Vec<Value>; Field::COUNT],
}

impl FieldSequences {
    /// Resolves and coerces every field of `record`.
    pub fn from_record(record: &RawRecord) -> Self {
        let mut sequences = Self::default();
        for field in Field::ALL {
            sequences.columns[field.index()] = coerce_sequence(resolve_field(record, field));
        }
        sequences
    }

    /// Builder method to set one column directly.
    pub fn with_column(mut self, field: Field, values: Vec<Value>) -> Self {
        self.columns[field.index()] = values;
        self
    }

    /// Returns the column for `field`.
    pub fn column(&self, field: Field) -> &[Value] {
        &self.columns[field.index()]
    }

    /// Length of the longest column.
    pub fn max_len(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Builds the row at `index`.
    pub fn row(&self, index: usize) -> RawRow {
        RawRow {
            values: std::array::from_fn(|i| self.columns[i].get(index).cloned()),
        }
    }
}

/// One raw value per logical field, all taken from the same position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    values: [Option<Value>; Field::COUNT],
}

impl RawRow {
    /// Returns the raw value of `field`, or `None` past the column's end.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.values[field.index()].as_ref()
    }

    /// Builder method to set one field.
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.values[field.index()] = Some(value.into());
        self
    }
}

/// Zips the columns back into rows, one per index up to the longest column.
pub fn reconstruct_rows(sequences: &FieldSequences) -> Vec<RawRow> {
    (0..sequences.max_len())
        .map(|index| sequences.row(index))
        .collect()
}
