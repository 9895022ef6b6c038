//! Derived statistics for a result table.

use crate::amount::{Amount, TotalStyle};
use crate::record::Record;

/// Record count, total amount and (for tables with a bank column) how many
/// records each bank has, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub total: Amount,
    pub banks: Vec<(String, usize)>,
}

impl Summary {
    /// Computes the summary of a record list. Missing or unreadable amounts
    /// count as zero.
    pub fn of<T: Record>(records: &[T]) -> Self {
        let total: Amount = records
            .iter()
            .filter_map(|r| r.field(T::AMOUNT_FIELD))
            .map(Amount::parse_or_zero)
            .sum();

        let mut banks: Vec<(String, usize)> = Vec::new();
        if let Some(bank_field) = T::BANK_FIELD {
            for bank in records.iter().filter_map(|r| r.field(bank_field)) {
                match banks.iter_mut().find(|(name, _)| name == bank) {
                    Some((_, count)) => *count += 1,
                    None => banks.push((bank.to_string(), 1)),
                }
            }
        }

        Summary {
            records: records.len(),
            total,
            banks,
        }
    }

    /// Renders the summary as the plain-text stats block.
    pub fn render(&self, style: TotalStyle) -> String {
        let mut lines = vec![
            format!("Total Records: {}", self.records),
            format!("Total Amount: Rp {}", self.total.format(style)),
        ];
        if !self.banks.is_empty() {
            lines.push("Bank Distribution:".to_string());
            lines.extend(
                self.banks
                    .iter()
                    .map(|(bank, count)| format!("  {bank}: {count}")),
            );
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
