//! Admin withdrawal log parser.
//!
//! The log is a loose sequence of lines. A line like `1  topjaya` opens a new
//! entry; a `Withdraw ...` line and a `BANK, account, NAME` line fill it in.
//! Anything else is ignored.

use crate::error::{ParseError, Result};
use crate::record::AdminRecord;
use crate::topjitu::split_lines;
use log::{debug, info};
use regex::Regex;
use std::sync::OnceLock;

/// Zero-based whitespace token holding the amount on a withdraw line.
const AMOUNT_TOKEN: usize = 3;

fn record_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\s+[A-Za-z0-9_]").expect("invalid record start regex"))
}

/// What a single trimmed line means to the parser.
#[derive(Debug, PartialEq, Eq)]
enum AdminLine<'a> {
    /// `<number> <id> ...`: opens a new entry.
    Start { id: &'a str },
    /// `Withdraw <date> <time> <amount> ...`
    Withdraw { amount: Option<&'a str> },
    /// `<bank>, <account>, <name...>`
    Detail { bank: &'a str, name: String },
    Other,
}

impl<'a> AdminLine<'a> {
    fn classify(line: &'a str) -> Self {
        if record_start_re().is_match(line) {
            let id = line.split_whitespace().nth(1).unwrap_or("");
            return AdminLine::Start { id };
        }

        if line.to_lowercase().starts_with("withdraw") {
            return AdminLine::Withdraw {
                amount: line.split_whitespace().nth(AMOUNT_TOKEN),
            };
        }

        if line.contains(',') {
            let parts: Vec<&str> = line.split(',').collect();
            let name = parts.get(2..).map(|rest| rest.join(",")).unwrap_or_default();
            return AdminLine::Detail {
                bank: parts[0].trim(),
                name: name.trim().to_string(),
            };
        }

        AdminLine::Other
    }
}

/// Accumulates lines into [`AdminRecord`]s.
///
/// Entries are never backfilled or rejected: an entry whose withdraw or
/// detail line never appeared keeps those fields as `None`.
#[derive(Debug, Default)]
pub struct AdminLogParser {
    current: Option<AdminRecord>,
    records: Vec<AdminRecord>,
}

impl AdminLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        match AdminLine::classify(line) {
            AdminLine::Start { id } => {
                self.flush();
                debug!("Admin entry started: {}", id);
                self.current = Some(AdminRecord {
                    id: id.to_string(),
                    ..Default::default()
                });
            }
            AdminLine::Withdraw { amount } => {
                if let Some(entry) = self.current.as_mut() {
                    entry.amount = amount.map(str::to_string);
                }
            }
            AdminLine::Detail { bank, name } => {
                if let Some(entry) = self.current.as_mut() {
                    entry.bank = Some(bank.to_string());
                    entry.name = Some(name);
                }
            }
            AdminLine::Other => {}
        }
    }

    fn flush(&mut self) {
        if let Some(entry) = self.current.take() {
            if entry.id.is_empty() {
                debug!("Dropping admin entry without id");
            } else {
                self.records.push(entry);
            }
        }
    }

    /// Flushes the open entry and returns everything collected.
    pub fn finish(mut self) -> Vec<AdminRecord> {
        self.flush();
        self.records
    }
}

/// Parses a pasted admin log.
///
/// # Example
///
/// ```
/// use pga_parser::admin::parse_admin_log;
///
/// let log = "1\t\ttopjaya\n\
///            Withdraw\t2025-12-12 09:31:26\t1,000,000 \t601,433.50\n\
///            G3\n\
///            SEABANK, 901738613824, MUHAMMAD ROHIM S KOM";
/// let records = parse_admin_log(log).unwrap();
///
/// assert_eq!(records[0].id, "topjaya");
/// assert_eq!(records[0].amount.as_deref(), Some("1,000,000"));
/// ```
pub fn parse_admin_log(text: &str) -> Result<Vec<AdminRecord>> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = AdminLogParser::new();
    for line in split_lines(text) {
        parser.push_line(line);
    }
    let records = parser.finish();

    if records.is_empty() {
        return Err(ParseError::NoValidAdminData);
    }

    info!("Parsed {} admin entries", records.len());
    Ok(records)
}
