//! Column sorting with per-table toggle state.
//!
//! Sorting the same column of the same table twice flips the order; sorting
//! by a different column starts over in ascending order.

use crate::amount::numeric_sort_key;
use crate::error::{ParseError, Result};
use crate::record::Record;
use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Identity of a result table. Each table keeps its own sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// TOPJITU transaction results
    Results,
    /// PGA deposit rows
    Pga,
    /// Admin withdrawal entries
    Admin,
    /// Cashback rows
    Cashback,
}

impl TableId {
    pub fn name(&self) -> &'static str {
        match self {
            TableId::Results => "results",
            TableId::Pga => "pga",
            TableId::Admin => "admin",
            TableId::Cashback => "cashback",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// The last sort applied to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

/// Sort state for every table, kept for the whole session.
#[derive(Debug, Default)]
pub struct SortRegistry {
    states: HashMap<TableId, SortState>,
}

impl SortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sort state of a table, if it has been sorted at all.
    pub fn state(&self, table: TableId) -> Option<&SortState> {
        self.states.get(&table)
    }

    /// Sorts `records` in place by `field`, then calls `redraw` with the result.
    ///
    /// The state is kept under `T::TABLE`. Field names match the table's
    /// columns case-insensitively, and the state stores the column's own
    /// spelling, so `amount` followed by `Amount` toggles. Fields whose name
    /// contains `amount` or `nominal` compare numerically; everything else
    /// compares as lowercase text. Equal keys keep their relative order.
    /// Fails without touching the state if `field` is not a column of `T`.
    pub fn sort<T, F>(&mut self, field: &str, records: &mut [T], redraw: F) -> Result<()>
    where
        T: Record,
        F: FnOnce(&[T]),
    {
        let table = T::TABLE;
        let Some(column) = T::COLUMNS.iter().find(|c| c.eq_ignore_ascii_case(field)) else {
            return Err(ParseError::UnknownColumn {
                column: field.to_string(),
                table: table.name(),
            });
        };
        let field = *column;

        let order = match self.states.get(&table) {
            Some(state) if state.key == field => state.order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.states.insert(
            table,
            SortState {
                key: field.to_string(),
                order,
            },
        );

        let numeric = is_numeric_field(field);
        records.sort_by(|a, b| {
            let a = a.field(field).unwrap_or("");
            let b = b.field(field).unwrap_or("");
            let ordering = if numeric {
                compare_numeric(a, b)
            } else {
                a.to_lowercase().cmp(&b.to_lowercase())
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        debug!("Sorted {} rows of {} by {} ({:?})", records.len(), table, field, order);

        redraw(&*records);
        Ok(())
    }
}

fn is_numeric_field(field: &str) -> bool {
    let lower = field.to_lowercase();
    lower.contains("amount") || lower.contains("nominal")
}

// Unreadable keys sort before every number so the ordering stays total.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (numeric_sort_key(a), numeric_sort_key(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
