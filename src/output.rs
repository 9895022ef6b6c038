//! Table output: full CSV/TSV tables and clipboard-style column copies.

use crate::error::{ParseError, Result};
use crate::record::Record;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::io::Write;

/// Checks every requested column against the record type.
pub fn resolve_columns<T: Record>(columns: &[&str]) -> Result<()> {
    for column in columns {
        if !T::COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            return Err(ParseError::UnknownColumn {
                column: column.to_string(),
                table: T::TABLE.name(),
            });
        }
    }
    Ok(())
}

/// Builds the text a "copy" action puts on the clipboard: the requested
/// columns joined by tabs, one record per line, no header and no trailing
/// newline.
///
/// ```
/// use pga_parser::output::copy_columns;
/// use pga_parser::DepositRecord;
///
/// let rows = vec![DepositRecord {
///     id: "INV1".into(),
///     amount: "100000".into(),
///     space: String::new(),
///     ref_numb: "REF001".into(),
/// }];
/// assert_eq!(copy_columns(&rows, &["id", "amount"]).unwrap(), "INV1\t100000");
/// ```
pub fn copy_columns<T: Record>(records: &[T], columns: &[&str]) -> Result<String> {
    resolve_columns::<T>(columns)?;

    let lines: Vec<String> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.field(c).unwrap_or("").trim())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect();

    Ok(lines.join("\n"))
}

/// Copies every display column, in table order.
pub fn copy_table<T: Record>(records: &[T]) -> Result<String> {
    copy_columns(records, T::COLUMNS)
}

/// Writes records as a delimited table with a header row.
///
/// Fields are quoted only when the delimiter or a quote appears in them.
pub fn write_table<T, W>(records: &[T], writer: W, delimiter: u8) -> Result<()>
where
    T: Record + Serialize,
    W: Write,
{
    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    for record in records {
        csv_writer.serialize(record)?;
    }
    if records.is_empty() {
        csv_writer.write_record(T::COLUMNS)?;
    }

    csv_writer.flush()?;
    Ok(())
}
