use clap::{Args, Parser, Subcommand, ValueEnum};
use pga_parser::{TerminatorPolicy, TotalStyle};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pga-parser",
    version,
    about = "Extract transaction, deposit, admin and cashback records from pasted dumps and CSV exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse TOPJITU transaction blocks from pasted text.
    Topjitu {
        /// Text file to read (default: stdin)
        input: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Parse a PGA deposit CSV export.
    Pga {
        /// CSV file to read (default: stdin)
        input: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Parse a pasted admin withdrawal log.
    Admin {
        /// Text file to read (default: stdin)
        input: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Parse a cashback CSV export.
    Cashback {
        /// CSV file to read (default: stdin)
        input: Option<PathBuf>,
        /// Where the -100000 sentinel ends the data: last or first
        #[arg(long, default_value = "last")]
        policy: TerminatorPolicy,
        /// Print only one of the three display slices
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        slice: Option<u8>,
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Options shared by every table.
#[derive(Args)]
pub struct ViewArgs {
    /// Sort by a column; repeat to toggle (e.g. --sort amount --sort amount)
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Vec<String>,

    /// Print only these columns, tab-separated without a header (copy text)
    #[arg(long, value_delimiter = ',', value_name = "A,B,...")]
    pub columns: Option<Vec<String>>,

    /// Full-table output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Print record count, total and bank distribution to stderr
    #[arg(long)]
    pub summary: bool,

    /// How the total amount is rendered
    #[arg(long, value_enum, default_value_t = TotalStyleArg::Grouped)]
    pub total_style: TotalStyleArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TotalStyleArg {
    /// 1.234.567
    Grouped,
    /// 1,234,567.00
    Decimal,
}

impl From<TotalStyleArg> for TotalStyle {
    fn from(arg: TotalStyleArg) -> Self {
        match arg {
            TotalStyleArg::Grouped => TotalStyle::Grouped,
            TotalStyleArg::Decimal => TotalStyle::Decimal,
        }
    }
}
