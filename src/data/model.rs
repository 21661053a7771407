use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::error::{BikeshareError, Result};

/// Display / serialisation format for timestamps, matching the source files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Column names shared by the three city layouts.
pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";
/// The exported row index, whose header is empty in every file.
pub const UNNAMED_INDEX: &str = "Unnamed: 0";
pub const TRIP_ID: &str = "Trip Id";

// ---------------------------------------------------------------------------
// CellValue – a single cell in a trip table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, mirroring the dtypes a CSV column can end up with.
/// Counted in `BTreeMap`s downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord so we can key BTreeMaps by CellValue --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
                Timestamp(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Timestamp(t) => serializer.collect_str(&t.format(TIMESTAMP_FORMAT)),
            CellValue::Null => serializer.serialize_none(),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// TripTable – rows of one city's trip history
// ---------------------------------------------------------------------------

/// Column-named rows of cells. Every row has exactly `column_names.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    /// Column names in file order, derived columns appended at the end.
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TripTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == column_names.len()));
        TripTable { column_names, rows }
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no trips.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Position of `name`, or `MissingColumn`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| BikeshareError::MissingColumn(name.to_string()))
    }

    /// Iterate over one column's cells in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Replace the column `name` with `values`, appending it when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_names.iter().position(|c| c == name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.column_names.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Rewrite every cell of `name` in place. `f` receives the row number.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &CellValue) -> Result<CellValue>,
    {
        let idx = self.column_index(name)?;
        for (row_no, row) in self.rows.iter_mut().enumerate() {
            row[idx] = f(row_no, &row[idx])?;
        }
        Ok(())
    }

    /// Rename a column. Returns `false` when `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_names.iter_mut().find(|c| c.as_str() == from) {
            Some(col) => {
                *col = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Keep only rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Replace every null cell with `value`, leaving the columns in `keep_null`
    /// untouched.
    pub fn fill_null(&mut self, value: &CellValue, keep_null: &[&str]) {
        let skip: Vec<bool> = self
            .column_names
            .iter()
            .map(|c| keep_null.contains(&c.as_str()))
            .collect();
        for row in &mut self.rows {
            for (cell, skip) in row.iter_mut().zip(&skip) {
                if !*skip && cell.is_null() {
                    *cell = value.clone();
                }
            }
        }
    }

    /// Rows in `[start, start + len)`, clamped to the table.
    pub fn slice(&self, start: usize, len: usize) -> &[Vec<CellValue>] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}
