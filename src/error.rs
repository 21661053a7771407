use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy shared by every pipeline stage
// ---------------------------------------------------------------------------

/// Errors produced while collecting filters, loading, preparing or
/// summarising a trip table.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A value outside one of the fixed option sets.
    #[error("invalid input '{input}', expected one of: {expected}")]
    InvalidUserInput { input: String, expected: String },

    /// A column the stage needs is not in the table.
    #[error("Incorrect file format: column \"{0}\" must be present")]
    MissingColumn(String),

    /// Min/max/mode/mean over zero values.
    #[error("no {0} available to summarise")]
    EmptyAggregationInput(&'static str),

    /// A cell that cannot be coerced to the column's type.
    #[error("row {row}, column \"{column}\": cannot interpret '{value}'")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// The city's data file could not be opened.
    #[error("cannot open data file {}: {source}", .path.display())]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row with more fields than the header.
    #[error("row {row}: found {found} fields, but the header has {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
