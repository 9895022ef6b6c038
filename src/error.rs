//! Error types for the parsers.

use crate::notice::Notice;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Blob-level failures. Per-record problems never end up here; they are
/// reported as notices or skipped rows and scanning continues.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write CSV output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Nothing but whitespace was provided
    #[error("No input data provided.")]
    EmptyInput,

    /// A required header column could not be located
    #[error("Required columns not found. Please ensure CSV contains: {required} columns.")]
    MissingColumns { required: &'static str },

    /// The CSV has a header but no data rows (or nothing at all)
    #[error("CSV must contain a header row and at least one data row.")]
    MissingDataRows,

    /// The block scan finished without a single valid block
    #[error("No valid transactions found. Please check the input format.")]
    NoValidTransactions { notices: Vec<Notice> },

    /// The CSV scan finished without a single usable row
    #[error("No valid data found in CSV file.")]
    NoValidData,

    /// The admin log contained no record-start lines
    #[error("No valid admin data found. Please check the input format.")]
    NoValidAdminData,

    /// A sort or copy request named a field the table does not have
    #[error("Unknown column '{column}' for table {table}")]
    UnknownColumn { column: String, table: &'static str },

    /// The input file does not carry a .csv extension
    #[error("Please select a valid CSV file: {0}")]
    NotCsvFile(String),
}
