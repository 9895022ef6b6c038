//! Non-fatal diagnostics produced while scanning.

use std::fmt;

/// Why one block or row was skipped. Scanning always continues after a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No `NOTE` line within the scan window after a `TOPJITU` anchor.
    MissingTerminator { block: usize },

    /// The block closed before reaching the minimum length.
    TooShort { block: usize, lines: usize, needed: usize },

    /// A required field was blank at its fixed line offset.
    MissingField {
        block: usize,
        field: &'static str,
        line: usize,
    },

    /// A CSV row had fewer fields than the highest required column needs.
    ShortRow { row: usize, fields: usize, needed: usize },

    /// A CSV row was present but a required value was blank.
    BlankRow { row: usize, field: &'static str },
}

impl Notice {
    /// Block number for block-level notices.
    pub fn block(&self) -> Option<usize> {
        match self {
            Notice::MissingTerminator { block }
            | Notice::TooShort { block, .. }
            | Notice::MissingField { block, .. } => Some(*block),
            Notice::ShortRow { .. } | Notice::BlankRow { .. } => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MissingTerminator { block } => {
                write!(f, "Block {block}: Missing 'NOTE' terminator")
            }
            Notice::TooShort {
                block,
                lines,
                needed,
            } => write!(
                f,
                "Block {block}: too short (only {lines} lines, need at least {needed})"
            ),
            Notice::MissingField { block, field, line } => {
                write!(f, "Block {block}: missing {field} (line {line})")
            }
            Notice::ShortRow {
                row,
                fields,
                needed,
            } => write!(f, "Row {row}: only {fields} fields, need at least {needed}"),
            Notice::BlankRow { row, field } => write!(f, "Row {row}: missing {field}"),
        }
    }
}
