//! # PGA Parser
//!
//! Extracts structured records from the text dumps and CSV exports an
//! operator pastes or loads during reconciliation, and turns them into
//! sortable tables and tab-separated copy text.
//!
//! ## Inputs
//!
//! - **TOPJITU dumps** ([`topjitu`]): fixed-layout blocks read by line offset
//! - **PGA deposit exports** ([`deposit`]): CSV located by header text
//! - **Admin withdrawal logs** ([`admin`]): loose multi-line entries
//! - **Cashback exports** ([`cashback`]): CSV cut off at a sentinel row
//!
//! ## Design Principles
//!
//! - **Text in, text out**: amounts keep their source formatting; numbers
//!   are derived only for totals and sorting ([`amount`])
//! - **Skip, don't abort**: a bad block or row becomes a [`Notice`]; only
//!   blob-level problems become a [`ParseError`]
//! - **Explicit state**: parsers are pure functions, sort state lives in a
//!   [`SortRegistry`] owned by the caller
//!
//! ## Example
//!
//! ```
//! use pga_parser::{parse_deposits, output, Summary, TotalStyle};
//!
//! let csv = "ID Invoice,Nominal,Ref.no\nINV1,100000,REF001\nINV2,250000,REF002\n";
//! let parsed = parse_deposits(csv).unwrap();
//!
//! assert_eq!(output::copy_columns(&parsed.records, &["id", "amount"]).unwrap(),
//!            "INV1\t100000\nINV2\t250000");
//! assert_eq!(Summary::of(&parsed.records).total.format(TotalStyle::Grouped), "350.000");
//! ```

pub mod admin;
pub mod amount;
pub mod cashback;
pub mod deposit;
pub mod error;
pub mod notice;
pub mod output;
pub mod record;
pub mod sort;
pub mod summary;
pub mod tokenizer;
pub mod topjitu;

pub use admin::parse_admin_log;
pub use amount::{Amount, TotalStyle};
pub use cashback::{parse_cashback, partition, TerminatorPolicy};
pub use deposit::parse_deposits;
pub use error::{ParseError, Result};
pub use notice::Notice;
pub use record::{AdminRecord, CashbackRecord, DepositRecord, Parsed, Record, TransactionRecord};
pub use sort::{SortOrder, SortRegistry, SortState, TableId};
pub use summary::Summary;
pub use topjitu::parse_transactions;
