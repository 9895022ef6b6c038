//! PGA deposit CSV parser.
//!
//! Columns are located by header text, so exports with extra or reordered
//! columns still parse. Rows go through the line tokenizer rather than a
//! full CSV reader: the exports are simple and the tokenizer's quoting rules
//! are the ones the rest of the tool relies on.

use crate::error::{ParseError, Result};
use crate::notice::Notice;
use crate::record::{DepositRecord, Parsed};
use crate::tokenizer::{clean_field, split_line};
use log::{debug, info};

const REQUIRED: &str = "ID Invoice, Nominal, Ref.no";

/// Header positions of the three columns a deposit row needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositColumns {
    pub id: usize,
    pub nominal: usize,
    pub reference: usize,
}

impl DepositColumns {
    /// Finds the columns by case-insensitive substring match; the first
    /// matching header wins.
    pub fn locate(headers: &[String]) -> Option<Self> {
        Some(DepositColumns {
            id: find_column(headers, |h| h.contains("id invoice"))?,
            nominal: find_column(headers, |h| h.contains("nominal"))?,
            reference: find_column(headers, |h| h.contains("ref.no") || h.contains("ref no"))?,
        })
    }

    /// Fields a row must have to reach every column.
    fn min_fields(&self) -> usize {
        self.id.max(self.nominal).max(self.reference) + 1
    }
}

/// Index of the first header whose lowercase text satisfies `pred`.
pub(crate) fn find_column(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(h.to_lowercase().as_str()))
}

/// Non-blank, trimmed lines of a CSV blob.
pub(crate) fn content_lines(csv: &str) -> Vec<&str> {
    csv.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Parses a PGA deposit export.
///
/// Rows that are too short, or whose id or amount is blank, are skipped with
/// a notice. The reference may be blank.
///
/// # Example
///
/// ```
/// use pga_parser::deposit::parse_deposits;
///
/// let parsed = parse_deposits("ID Invoice,Nominal,Ref.no\nINV1,100000,REF001\n").unwrap();
///
/// assert_eq!(parsed.records[0].id, "INV1");
/// assert_eq!(parsed.records[0].ref_numb, "REF001");
/// ```
pub fn parse_deposits(csv: &str) -> Result<Parsed<DepositRecord>> {
    let lines = content_lines(csv);
    let Some((header, rows)) = lines.split_first() else {
        return Err(ParseError::EmptyInput);
    };

    let headers: Vec<String> = split_line(header).iter().map(|h| clean_field(h)).collect();
    let columns = DepositColumns::locate(&headers).ok_or(ParseError::MissingColumns {
        required: REQUIRED,
    })?;
    debug!("Deposit columns: {:?}", columns);

    let mut records = Vec::new();
    let mut notices = Vec::new();

    for (idx, line) in rows.iter().enumerate() {
        let row = idx + 2; // 1-indexed, accounting for header row
        let values = split_line(line);

        if values.len() < columns.min_fields() {
            debug!("Row {}: skipping short row ({} fields)", row, values.len());
            notices.push(Notice::ShortRow {
                row,
                fields: values.len(),
                needed: columns.min_fields(),
            });
            continue;
        }

        let id = clean_field(&values[columns.id]);
        let amount = clean_field(&values[columns.nominal]);
        let ref_numb = clean_field(&values[columns.reference]);

        if id.is_empty() || amount.is_empty() {
            let field = if id.is_empty() { "id" } else { "amount" };
            debug!("Row {}: skipping row without {}", row, field);
            notices.push(Notice::BlankRow { row, field });
            continue;
        }

        records.push(DepositRecord {
            id,
            amount,
            space: String::new(),
            ref_numb,
        });
    }

    if records.is_empty() {
        return Err(ParseError::NoValidData);
    }

    info!("Parsed {} deposit rows ({} skipped)", records.len(), notices.len());
    Ok(Parsed { records, notices })
}
