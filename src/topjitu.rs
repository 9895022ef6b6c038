//! Fixed-layout block parser for `TOPJITU` transaction dumps.
//!
//! A block starts at a line that is exactly `TOPJITU` (after trimming) and
//! ends at the first line that is exactly `NOTE`. Fields sit at fixed line
//! numbers inside the block; the upstream dump always puts them there, so
//! nothing here tries to recognise field content beyond presence and the
//! transfer-reference shape.

use crate::error::{ParseError, Result};
use crate::notice::Notice;
use crate::record::{Parsed, TransactionRecord};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::OnceLock;

/// Line that opens a block.
pub const ANCHOR: &str = "TOPJITU";

/// Line that closes a block.
pub const TERMINATOR: &str = "NOTE";

/// Lines scanned for the terminator, anchor included.
pub const MAX_BLOCK_LINES: usize = 50;

/// Blocks shorter than this, terminator included, are rejected.
pub const MIN_BLOCK_LINES: usize = 10;

/// A required field and its 1-based line inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLine {
    pub name: &'static str,
    pub line: usize,
}

/// Required fields by line offset, in the order they are checked.
pub const FIELD_LINES: [FieldLine; 4] = [
    FieldLine { name: "ID", line: 9 },
    FieldLine { name: "Name", line: 11 },
    FieldLine { name: "Bank", line: 13 },
    FieldLine { name: "Nominal", line: 15 },
];

/// Line that may carry a `TF_` transfer reference.
pub const REFERENCE_LINE: usize = 22;

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^TF_[0-9]{6}_[A-Z0-9]{15,30}$").expect("invalid reference regex"))
}

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^Rp\s*").expect("invalid currency regex"))
}

/// Splits text into lines, treating `\r\n`, `\r` and `\n` alike.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        lines.push(&rest[..pos]);
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
    }
    lines.push(rest);
    lines
}

/// Returns the trimmed line if it is a well-formed transfer reference.
pub fn transfer_reference(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    reference_re().is_match(trimmed).then_some(trimmed)
}

/// Trims a nominal and drops a leading `Rp` marker, keeping its formatting.
pub fn strip_currency(nominal: &str) -> &str {
    let trimmed = nominal.trim();
    match currency_re().find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

/// Result of examining one candidate block.
enum BlockOutcome {
    Record(TransactionRecord),
    Rejected(Vec<Notice>),
}

/// Scans pasted text for `TOPJITU ... NOTE` blocks.
///
/// Fails on blank input, and when the whole pass produced no record. In the
/// latter case the error still carries the per-block notices.
///
/// # Example
///
/// ```
/// use pga_parser::topjitu::parse_transactions;
///
/// let mut lines = vec!["TOPJITU"];
/// lines.extend(["-"; 7]);
/// lines.extend(["ID001", "-", "BUDI", "-", "BCA", "-", "Rp 1.000.000", "NOTE"]);
/// let parsed = parse_transactions(&lines.join("\n")).unwrap();
///
/// assert_eq!(parsed.records[0].amount, "1.000.000");
/// ```
pub fn parse_transactions(text: &str) -> Result<Parsed<TransactionRecord>> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let lines = split_lines(text);
    let mut records = Vec::new();
    let mut notices = Vec::new();
    let mut pos = 0;
    let mut block = 1;

    while pos < lines.len() {
        if lines[pos].trim() != ANCHOR {
            pos += 1;
            continue;
        }

        let window = &lines[pos..lines.len().min(pos + MAX_BLOCK_LINES)];
        let Some(end) = window.iter().position(|l| l.trim() == TERMINATOR) else {
            let notice = Notice::MissingTerminator { block };
            warn!("{}", notice);
            notices.push(notice);
            pos += 1;
            block += 1;
            continue;
        };
        let block_lines = &window[..=end];

        if block_lines.len() < MIN_BLOCK_LINES {
            let notice = Notice::TooShort {
                block,
                lines: block_lines.len(),
                needed: MIN_BLOCK_LINES,
            };
            warn!("{}", notice);
            notices.push(notice);
            pos += 1;
            block += 1;
            continue;
        }

        match read_block(block, block_lines) {
            BlockOutcome::Record(record) => {
                debug!("Block {}: {} / {} / {}", block, record.id, record.bank, record.amount);
                records.push(record);
            }
            BlockOutcome::Rejected(rejections) => {
                for notice in &rejections {
                    warn!("{}", notice);
                }
                notices.extend(rejections);
            }
        }

        pos += block_lines.len();
        block += 1;
    }

    if records.is_empty() {
        return Err(ParseError::NoValidTransactions { notices });
    }

    info!(
        "Parsed {} transactions from {} blocks ({} notices)",
        records.len(),
        block - 1,
        notices.len()
    );
    Ok(Parsed { records, notices })
}

fn read_block(block: usize, lines: &[&str]) -> BlockOutcome {
    let line_at = |n: usize| lines.get(n - 1).copied().unwrap_or("");

    let [id, name, bank, nominal] = FIELD_LINES.map(|f| {
        let text = line_at(f.line);
        if f.name == "Nominal" {
            strip_currency(text)
        } else {
            text.trim()
        }
    });

    let rejections: Vec<Notice> = FIELD_LINES
        .iter()
        .zip([id, name, bank, nominal])
        .filter(|(_, value)| value.is_empty())
        .map(|(f, _)| Notice::MissingField {
            block,
            field: f.name,
            line: f.line,
        })
        .collect();

    if !rejections.is_empty() {
        return BlockOutcome::Rejected(rejections);
    }

    let reff = transfer_reference(line_at(REFERENCE_LINE)).unwrap_or("");

    BlockOutcome::Record(TransactionRecord {
        bank: bank.to_string(),
        id: id.to_string(),
        space: String::new(),
        amount: nominal.to_string(),
        name: name.to_string(),
        reff: reff.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a block with the given values at lines 9, 11, 13, 15 and
    /// optionally 22, padded with filler, ending in `NOTE`.
    fn block(id: &str, name: &str, bank: &str, nominal: &str, reff: Option<&str>) -> String {
        let len = if reff.is_some() { 23 } else { 16 };
        let mut lines = vec!["filler".to_string(); len];
        lines[0] = ANCHOR.to_string();
        lines[8] = id.to_string();
        lines[10] = name.to_string();
        lines[12] = bank.to_string();
        lines[14] = nominal.to_string();
        if let Some(r) = reff {
            lines[21] = r.to_string();
        }
        lines[len - 1] = TERMINATOR.to_string();
        lines.join("\n")
    }

    #[test]
    fn test_single_block() {
        let text = block(" ID001 ", "BUDI SANTOSO", "BCA", "Rp 1.000.000", None);
        let parsed = parse_transactions(&text).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.notices.is_empty());
        let record = &parsed.records[0];
        assert_eq!(record.id, "ID001");
        assert_eq!(record.name, "BUDI SANTOSO");
        assert_eq!(record.bank, "BCA");
        assert_eq!(record.amount, "1.000.000");
        assert_eq!(record.reff, "");
        assert_eq!(record.space, "");
    }

    #[test]
    fn test_currency_marker_variants() {
        assert_eq!(strip_currency("Rp 1.000.000"), "1.000.000");
        assert_eq!(strip_currency("  rp500.000 "), "500.000");
        assert_eq!(strip_currency("RP  25,000"), "25,000");
        assert_eq!(strip_currency("250000"), "250000");
        assert_eq!(strip_currency("Rp"), "");
    }

    #[test]
    fn test_reference_pattern() {
        assert_eq!(
            transfer_reference(" TF_202501_ABCDEFGHIJKLMNO "),
            Some("TF_202501_ABCDEFGHIJKLMNO")
        );
        assert_eq!(transfer_reference("TF_20250_ABCDEFGHIJKLMNO"), None);
        assert_eq!(transfer_reference("TF_202501_ABCDEFGHIJKLMN"), None);
        assert_eq!(transfer_reference("TF_202501_abcdefghijklmno"), None);

        let longest = format!("TF_202501_{}", "A1".repeat(15));
        assert_eq!(transfer_reference(&longest), Some(longest.as_str()));
        let too_long = format!("{longest}B");
        assert_eq!(transfer_reference(&too_long), None);
    }

    #[test]
    fn test_reference_read_from_line_22() {
        let text = block("ID1", "N", "B", "10", Some("TF_202501_ABCDEFGHIJKLMNO"));
        let parsed = parse_transactions(&text).unwrap();
        assert_eq!(parsed.records[0].reff, "TF_202501_ABCDEFGHIJKLMNO");

        let text = block("ID1", "N", "B", "10", Some("TF_20250_ABCDEFGHIJKLMNO"));
        let parsed = parse_transactions(&text).unwrap();
        assert_eq!(parsed.records[0].reff, "");
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let text = block("ID1", "N", "B", "10", None);
        let crlf = text.replace('\n', "\r\n");
        let cr = text.replace('\n', "\r");

        assert_eq!(parse_transactions(&crlf).unwrap().records[0].id, "ID1");
        assert_eq!(parse_transactions(&cr).unwrap().records[0].id, "ID1");
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines("\r\n\r\n"), vec!["", "", ""]);
    }

    #[test]
    fn test_missing_fields_reject_whole_block() {
        let text = format!(
            "{}\n{}",
            block("", "N", "B", "Rp ", None),
            block("ID2", "N2", "B2", "20", None)
        );
        let parsed = parse_transactions(&text).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id, "ID2");
        assert_eq!(
            parsed.notices,
            vec![
                Notice::MissingField {
                    block: 1,
                    field: "ID",
                    line: 9
                },
                Notice::MissingField {
                    block: 1,
                    field: "Nominal",
                    line: 15
                },
            ]
        );
    }

    #[test]
    fn test_too_short_block() {
        let text = format!(
            "TOPJITU\nx\nx\nNOTE\n{}",
            block("ID1", "N", "B", "10", None)
        );
        let parsed = parse_transactions(&text).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(
            parsed.notices,
            vec![Notice::TooShort {
                block: 1,
                lines: 4,
                needed: MIN_BLOCK_LINES
            }]
        );
    }

    #[test]
    fn test_missing_terminator_resumes_one_line_later() {
        // The second anchor sits inside the first anchor's 50-line window but
        // its NOTE does not, so it is only found because the scan resumes
        // right after the first anchor.
        let mut text = String::from("TOPJITU\n");
        text.push_str(&"junk\n".repeat(40));
        text.push_str(&block("ID1", "N", "B", "10", None));

        let parsed = parse_transactions(&text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id, "ID1");
        assert_eq!(parsed.notices, vec![Notice::MissingTerminator { block: 1 }]);
    }

    #[test]
    fn test_missing_terminator_only() {
        let mut text = String::from("TOPJITU\n");
        text.push_str(&"junk\n".repeat(60));
        text.push_str("NOTE\n");

        match parse_transactions(&text).unwrap_err() {
            ParseError::NoValidTransactions { notices } => {
                assert_eq!(notices, vec![Notice::MissingTerminator { block: 1 }]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_block_numbering_skips_free_text() {
        let text = format!(
            "header\nmore header\n{}\nbetween\n{}",
            block("ID1", "N", "B", "10", None),
            block("ID2", "N", "", "10", None)
        );
        let parsed = parse_transactions(&text).unwrap();
        assert_eq!(
            parsed.notices,
            vec![Notice::MissingField {
                block: 2,
                field: "Bank",
                line: 13
            }]
        );
    }

    #[test]
    fn test_no_valid_transactions() {
        let err = parse_transactions("TOPJITU\nNOTE\n").unwrap_err();
        match err {
            ParseError::NoValidTransactions { notices } => {
                assert_eq!(notices.len(), 1);
                assert_eq!(notices[0].block(), Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            parse_transactions("no blocks here"),
            Err(ParseError::NoValidTransactions { .. })
        ));
    }

    #[test]
    fn test_blank_input() {
        assert!(matches!(parse_transactions("  \n\t\n"), Err(ParseError::EmptyInput)));
    }
}
