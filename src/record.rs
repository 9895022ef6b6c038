//! Record models produced by the parsers.
//!
//! Every amount is kept exactly as it appeared in the source text. Numeric
//! views are derived on demand (see [`crate::amount`]) and never stored.

use crate::notice::Notice;
use crate::sort::TableId;
use serde::Serialize;

/// Named, read-only access to a record's fields.
///
/// Field names are matched case-insensitively. Fields a record knows about
/// but never received (see [`AdminRecord`]) read as the empty string.
pub trait Record {
    /// The table this record type is displayed in.
    const TABLE: TableId;

    /// Display columns, in table order.
    const COLUMNS: &'static [&'static str];

    /// Column that totals are computed over.
    const AMOUNT_FIELD: &'static str = "amount";

    /// Column that records are grouped by in the bank distribution, if any.
    const BANK_FIELD: Option<&'static str> = None;

    /// Returns the field's text, or `None` if the name is not a column.
    fn field(&self, name: &str) -> Option<&str>;
}

/// Records plus the notices collected while producing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub notices: Vec<Notice>,
}

impl<T> Parsed<T> {
    /// Number of records produced.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records were produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One transaction extracted from a `TOPJITU ... NOTE` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub bank: String,
    pub id: String,
    /// Always empty; keeps a blank column in the copied table.
    pub space: String,
    pub amount: String,
    pub name: String,
    /// `TF_` transfer reference, empty when line 22 does not carry one.
    pub reff: String,
}

impl Record for TransactionRecord {
    const TABLE: TableId = TableId::Results;
    const COLUMNS: &'static [&'static str] = &["bank", "id", "space", "amount", "name", "reff"];
    const BANK_FIELD: Option<&'static str> = Some("bank");

    fn field(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "bank" => Some(&self.bank),
            "id" => Some(&self.id),
            "space" => Some(&self.space),
            "amount" => Some(&self.amount),
            "name" => Some(&self.name),
            "reff" => Some(&self.reff),
            _ => None,
        }
    }
}

/// One deposit row from a PGA CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositRecord {
    pub id: String,
    pub amount: String,
    pub space: String,
    #[serde(rename = "refNumb")]
    pub ref_numb: String,
}

impl Record for DepositRecord {
    const TABLE: TableId = TableId::Pga;
    const COLUMNS: &'static [&'static str] = &["id", "amount", "space", "refNumb"];

    fn field(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(&self.id),
            "amount" => Some(&self.amount),
            "space" => Some(&self.space),
            "refnumb" => Some(&self.ref_numb),
            _ => None,
        }
    }
}

/// One withdrawal entry from the admin log.
///
/// Only `id` is guaranteed; the rest stay `None` when their line never
/// showed up before the next entry started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminRecord {
    pub id: String,
    pub amount: Option<String>,
    pub bank: Option<String>,
    pub name: Option<String>,
}

impl Record for AdminRecord {
    const TABLE: TableId = TableId::Admin;
    const COLUMNS: &'static [&'static str] = &["id", "amount", "bank", "name"];
    const BANK_FIELD: Option<&'static str> = Some("bank");

    fn field(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(&self.id),
            "amount" => Some(self.amount.as_deref().unwrap_or("")),
            "bank" => Some(self.bank.as_deref().unwrap_or("")),
            "name" => Some(self.name.as_deref().unwrap_or("")),
            _ => None,
        }
    }
}

/// One player row from a cashback CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashbackRecord {
    pub id: String,
    #[serde(rename = "lossAmount")]
    pub loss_amount: String,
}

impl Record for CashbackRecord {
    const TABLE: TableId = TableId::Cashback;
    const COLUMNS: &'static [&'static str] = &["id", "lossAmount"];
    const AMOUNT_FIELD: &'static str = "lossAmount";

    fn field(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(&self.id),
            "lossamount" => Some(&self.loss_amount),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_is_case_insensitive() {
        let record = DepositRecord {
            id: "INV1".to_string(),
            amount: "100000".to_string(),
            space: String::new(),
            ref_numb: "REF001".to_string(),
        };
        assert_eq!(record.field("refNumb"), Some("REF001"));
        assert_eq!(record.field("REFNUMB"), Some("REF001"));
        assert_eq!(record.field("nominal"), None);
    }

    #[test]
    fn test_missing_admin_fields_read_empty() {
        let record = AdminRecord {
            id: "topjaya".to_string(),
            ..Default::default()
        };
        assert_eq!(record.field("amount"), Some(""));
        assert_eq!(record.field("bank"), Some(""));
        assert_eq!(record.field("name"), Some(""));
    }

    #[test]
    fn test_every_column_resolves() {
        let record = CashbackRecord {
            id: "p1".to_string(),
            loss_amount: "-100000".to_string(),
        };
        for column in CashbackRecord::COLUMNS {
            assert!(record.field(column).is_some(), "{column}");
        }
    }
}
