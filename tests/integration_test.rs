//! Integration tests for the pga-parser CLI.
//!
//! These tests run the actual binary against fixture files written to a
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a fixture file into `dir` and return its path
fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Build a TOPJITU block with values at lines 9, 11, 13, 15 and 22
fn topjitu_block(id: &str, name: &str, bank: &str, nominal: &str, reff: &str) -> String {
    let mut lines = vec!["-".to_string(); 23];
    lines[0] = "TOPJITU".to_string();
    lines[8] = id.to_string();
    lines[10] = name.to_string();
    lines[12] = bank.to_string();
    lines[14] = nominal.to_string();
    lines[21] = reff.to_string();
    lines[22] = "NOTE".to_string();
    lines.join("\n")
}

fn pga_cmd() -> Command {
    Command::cargo_bin("pga-parser").unwrap()
}

#[test]
fn test_topjitu_full_table() {
    let dir = TempDir::new().unwrap();
    let text = format!(
        "pasted header\n{}\n{}\n",
        topjitu_block("ID001", "BUDI", "BCA", "Rp 1.000.000", "TF_202501_ABCDEFGHIJKLMNO"),
        topjitu_block("ID002", "SITI", "BRI", "Rp 250.000", "-")
    );
    let input = fixture(&dir, "paste.txt", &text);

    pga_cmd()
        .arg("topjitu")
        .arg(&input)
        .assert()
        .success()
        .stdout(
            "bank,id,space,amount,name,reff\n\
             BCA,ID001,,1.000.000,BUDI,TF_202501_ABCDEFGHIJKLMNO\n\
             BRI,ID002,,250.000,SITI,\n",
        );
}

#[test]
fn test_topjitu_summary_and_notices() {
    let dir = TempDir::new().unwrap();
    let text = format!(
        "{}\n{}\n",
        topjitu_block("ID001", "BUDI", "BCA", "Rp 1.000.000", "-"),
        topjitu_block("ID002", "", "BRI", "Rp 250.000", "-")
    );
    let input = fixture(&dir, "paste.txt", &text);

    pga_cmd()
        .args(["topjitu", "--summary"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Block 2: missing Name (line 11)"))
        .stderr(predicate::str::contains("Total Records: 1"))
        .stderr(predicate::str::contains("Total Amount: Rp 1.000.000"))
        .stderr(predicate::str::contains("  BCA: 1"));
}

#[test]
fn test_topjitu_no_valid_transactions() {
    pga_cmd()
        .arg("topjitu")
        .write_stdin("TOPJITU\nshort\nNOTE\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Block 1: too short"))
        .stderr(predicate::str::contains("No valid transactions found"));
}

#[test]
fn test_pga_copy_id_and_amount() {
    let dir = TempDir::new().unwrap();
    let input = fixture(
        &dir,
        "deposits.csv",
        "ID Invoice,Nominal,Ref.no\nINV1,100000,REF001\nINV2,\"1,500,000\",REF002\n",
    );

    pga_cmd()
        .args(["pga", "--columns", "id,amount"])
        .arg(&input)
        .assert()
        .success()
        .stdout("INV1\t100000\nINV2\t1,500,000\n");
}

#[test]
fn test_pga_sort_toggles_to_descending() {
    let dir = TempDir::new().unwrap();
    let input = fixture(
        &dir,
        "deposits.csv",
        "ID Invoice,Nominal,Ref.no\nA,500,R1\nB,\"1,500,000\",R2\nC,20000,R3\n",
    );

    pga_cmd()
        .args(["pga", "--columns", "id", "--sort", "amount", "--sort", "amount"])
        .arg(&input)
        .assert()
        .success()
        .stdout("B\nC\nA\n");

    pga_cmd()
        .args(["pga", "--columns", "id", "--sort", "amount", "--sort", "AMOUNT"])
        .arg(&input)
        .assert()
        .success()
        .stdout("B\nC\nA\n");
}

#[test]
fn test_pga_rejects_non_csv_file() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "deposits.txt", "ID Invoice,Nominal,Ref.no\nINV1,1,R\n");

    pga_cmd()
        .arg("pga")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid CSV file"));
}

#[test]
fn test_pga_missing_columns() {
    pga_cmd()
        .arg("pga")
        .write_stdin("Invoice,Amount\nINV1,1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Required columns not found"));
}

#[test]
fn test_admin_from_stdin() {
    let log = "1\t\ttopjaya\n\
               Withdraw\t2025-12-12 09:31:26\t1,000,000 \t601,433.50\n\
               G3\n\
               SEABANK, 901738613824, MUHAMMAD ROHIM S KOM\n\
               2\t\tdeawae\n\
               Withdraw\t2025-12-13 22:08:21\t5,000,000 \t15,512,915\n\
               G4\n\
               BCA, 3300901394, M YUDA\n";

    pga_cmd()
        .args(["admin", "--format", "tsv", "--summary", "--total-style", "decimal"])
        .write_stdin(log)
        .assert()
        .success()
        .stdout(
            "id\tamount\tbank\tname\n\
             topjaya\t1,000,000\tSEABANK\tMUHAMMAD ROHIM S KOM\n\
             deawae\t5,000,000\tBCA\tM YUDA\n",
        )
        .stderr(predicate::str::contains("Total Amount: Rp 6,000,000.00"));
}

#[test]
fn test_cashback_slices() {
    let dir = TempDir::new().unwrap();
    let mut csv = String::from("User ID,Turnover,Loss Amount\n");
    for i in 1..=10 {
        csv.push_str(&format!("p{i},100,-{i}000\n"));
    }
    csv.push_str("p11,100,-100000\npad,0,0\n");
    let input = fixture(&dir, "cashback.csv", &csv);

    // 11 rows kept through the sentinel: slices of 4, 4, 3
    pga_cmd()
        .args(["cashback", "--slice", "3", "--columns", "id"])
        .arg(&input)
        .assert()
        .success()
        .stdout("p9\np10\np11\n");

    pga_cmd()
        .args(["cashback", "--policy", "first", "--slice", "1", "--columns", "id"])
        .arg(&input)
        .assert()
        .success()
        .stdout("p1\np2\np3\np4\n");
}

#[test]
fn test_cashback_header_only() {
    pga_cmd()
        .arg("cashback")
        .write_stdin("User ID,Turnover,Loss Amount\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("header row and at least one data row"));
}

#[test]
fn test_unknown_sort_column() {
    pga_cmd()
        .args(["admin", "--sort", "reff"])
        .write_stdin("1 alice\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column 'reff' for table admin"));
}

#[test]
fn test_missing_file_error() {
    pga_cmd()
        .args(["topjitu", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_empty_input() {
    pga_cmd()
        .arg("admin")
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input data provided."));
}
