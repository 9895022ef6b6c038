//! Cashback CSV parser.
//!
//! Exports end their usable data at a sentinel row whose loss amount is
//! exactly `-100000`. Rows after it are padding and are dropped.

use crate::deposit::{content_lines, find_column};
use crate::error::{ParseError, Result};
use crate::notice::Notice;
use crate::record::{CashbackRecord, Parsed};
use crate::tokenizer::{clean_field, split_line};
use log::{debug, info};
use std::str::FromStr;

/// Loss amount that marks the end of usable data.
pub const SENTINEL: &str = "-100000";

/// Column holding the player id.
pub const ID_COLUMN: usize = 0;

/// Loss-amount column used when no header names it.
pub const FALLBACK_LOSS_COLUMN: usize = 2;

/// Number of slices the result table is split into for display.
pub const SLICES: usize = 3;

/// Where the sentinel ends the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminatorPolicy {
    /// Keep every row up to and including the last sentinel row.
    #[default]
    KeepThroughLast,
    /// Stop at the first sentinel row, excluding it.
    StopAtFirst,
}

impl FromStr for TerminatorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last" | "keep-through-last" => Ok(TerminatorPolicy::KeepThroughLast),
            "first" | "stop-at-first" => Ok(TerminatorPolicy::StopAtFirst),
            other => Err(format!("unknown terminator policy '{other}' (expected 'last' or 'first')")),
        }
    }
}

/// Locates the loss-amount column: a header containing `loss amount`, or
/// the fixed fallback column when the header is wide enough.
pub fn locate_loss_column(headers: &[String]) -> Option<usize> {
    find_column(headers, |h| h.contains("loss amount"))
        .or((headers.len() > FALLBACK_LOSS_COLUMN).then_some(FALLBACK_LOSS_COLUMN))
}

/// Parses a cashback export under the given terminator policy.
///
/// # Example
///
/// ```
/// use pga_parser::cashback::{parse_cashback, TerminatorPolicy};
///
/// let csv = "User,Turnover,Loss Amount\np1,10,-5000\np2,10,-100000\np3,10,-7000\n";
/// let parsed = parse_cashback(csv, TerminatorPolicy::KeepThroughLast).unwrap();
///
/// assert_eq!(parsed.records.len(), 2);
/// assert_eq!(parsed.records[1].loss_amount, "-100000");
/// ```
pub fn parse_cashback(csv: &str, policy: TerminatorPolicy) -> Result<Parsed<CashbackRecord>> {
    let lines = content_lines(csv);
    if lines.len() < 2 {
        return Err(ParseError::MissingDataRows);
    }

    let headers: Vec<String> = split_line(lines[0]).iter().map(|h| clean_field(h)).collect();
    let loss_column = locate_loss_column(&headers).ok_or(ParseError::MissingColumns {
        required: "Loss Amount",
    })?;
    let needed = loss_column.max(ID_COLUMN) + 1;
    debug!("Cashback loss amount column: {}", loss_column);

    let mut records = Vec::new();
    let mut notices = Vec::new();
    // Records kept up to and including the last sentinel row seen.
    let mut kept_through_sentinel = None;

    for (idx, line) in lines[1..].iter().enumerate() {
        let row = idx + 2; // 1-indexed, accounting for header row
        let values = split_line(line);

        if values.len() < needed {
            debug!("Row {}: skipping short row ({} fields)", row, values.len());
            notices.push(Notice::ShortRow {
                row,
                fields: values.len(),
                needed,
            });
            continue;
        }

        // The sentinel depends on the loss amount alone, id or not.
        let loss_amount = clean_field(&values[loss_column]);
        let is_sentinel = loss_amount == SENTINEL;
        if is_sentinel && policy == TerminatorPolicy::StopAtFirst {
            debug!("Row {}: sentinel reached, stopping", row);
            break;
        }

        let id = clean_field(&values[ID_COLUMN]);
        if id.is_empty() {
            debug!("Row {}: skipping row without id", row);
            notices.push(Notice::BlankRow { row, field: "id" });
        } else {
            records.push(CashbackRecord { id, loss_amount });
        }

        if is_sentinel {
            kept_through_sentinel = Some(records.len());
        }
    }

    if let Some(keep) = kept_through_sentinel {
        debug!("Dropping {} rows after the last sentinel", records.len() - keep);
        records.truncate(keep);
    }

    if records.is_empty() {
        return Err(ParseError::NoValidData);
    }

    info!("Parsed {} cashback rows ({:?})", records.len(), policy);
    Ok(Parsed { records, notices })
}

/// Splits records into [`SLICES`] contiguous, nearly equal slices. Leftover
/// rows go to the earliest slices, one each.
///
/// ```
/// use pga_parser::cashback::partition;
///
/// let rows: Vec<u32> = (0..10).collect();
/// let sizes: Vec<usize> = partition(&rows).iter().map(|s| s.len()).collect();
/// assert_eq!(sizes, vec![4, 3, 3]);
/// ```
pub fn partition<T>(records: &[T]) -> [&[T]; SLICES] {
    let base = records.len() / SLICES;
    let extra = records.len() % SLICES;

    let mut rest = records;
    std::array::from_fn(|i| {
        let size = base + usize::from(i < extra);
        let (head, tail) = rest.split_at(size);
        rest = tail;
        head
    })
}
