//! PGA Parser CLI
//!
//! Reads a pasted dump or CSV export, prints the extracted table to stdout
//! and per-record notices to stderr.
//!
//! # Usage
//!
//! ```bash
//! pga-parser topjitu paste.txt --summary
//! pga-parser pga deposits.csv --columns id,amount
//! pga-parser cashback export.csv --slice 1 --columns id,lossAmount
//! pbpaste | pga-parser admin --sort amount
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

mod cli;

use clap::Parser;
use cli::{Cli, Command, ViewArgs};
use log::debug;
use pga_parser::{
    output, parse_admin_log, parse_cashback, parse_deposits, parse_transactions, partition,
    Notice, ParseError, Record, Result, SortRegistry, Summary,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Topjitu { input, view } => {
            let text = read_input(input.as_deref(), false)?;
            let parsed = parse_transactions(&text).inspect_err(|e| {
                if let ParseError::NoValidTransactions { notices } = e {
                    report_notices(notices);
                }
            })?;
            report_notices(&parsed.notices);
            show(parsed.records, &view)
        }
        Command::Pga { input, view } => {
            let text = read_input(input.as_deref(), true)?;
            let parsed = parse_deposits(&text)?;
            report_notices(&parsed.notices);
            show(parsed.records, &view)
        }
        Command::Admin { input, view } => {
            let text = read_input(input.as_deref(), false)?;
            show(parse_admin_log(&text)?, &view)
        }
        Command::Cashback {
            input,
            policy,
            slice,
            view,
        } => {
            let text = read_input(input.as_deref(), true)?;
            let parsed = parse_cashback(&text, policy)?;
            report_notices(&parsed.notices);

            let mut records = parsed.records;
            sort_records(&mut records, &view)?;
            let slices = partition(&records);
            debug!(
                "Cashback slices: {} / {} / {}",
                slices[0].len(),
                slices[1].len(),
                slices[2].len()
            );

            match slice {
                Some(n) => print_table(slices[usize::from(n) - 1], &view),
                None => print_table(&records, &view),
            }
        }
    }
}

/// Reads the whole input. CSV commands refuse files without a `.csv` extension.
fn read_input(path: Option<&Path>, csv_only: bool) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            let is_csv = p
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if csv_only && !is_csv {
                return Err(ParseError::NotCsvFile(p.display().to_string()));
            }
            Ok(fs::read_to_string(p)?)
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn report_notices(notices: &[Notice]) {
    if !notices.is_empty() {
        eprintln!("Found {} parsing notice(s):", notices.len());
        for notice in notices {
            eprintln!("  {}", notice);
        }
    }
}

fn sort_records<T: Record>(records: &mut [T], view: &ViewArgs) -> Result<()> {
    let mut registry = SortRegistry::new();
    for field in &view.sort {
        registry.sort(field, records, |rows| {
            debug!("Redraw {} rows of {}", rows.len(), T::TABLE);
        })?;
    }
    Ok(())
}

fn show<T: Record + Serialize>(mut records: Vec<T>, view: &ViewArgs) -> Result<()> {
    sort_records(&mut records, view)?;
    print_table(&records, view)
}

fn print_table<T: Record + Serialize>(records: &[T], view: &ViewArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match &view.columns {
        Some(columns) => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            let text = output::copy_columns(records, &columns)?;
            writeln!(handle, "{}", text)?;
        }
        None => output::write_table(records, handle, view.format.delimiter())?,
    }

    if view.summary {
        eprint!("{}", Summary::of(records).render(view.total_style.into()));
    }
    Ok(())
}
