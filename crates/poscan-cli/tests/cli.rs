//! Integration tests for the poscan binary.
//!
//! Only the engine-free surfaces are exercised here; the OCR path needs
//! the external Tesseract binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_TEXT: &str = "\
Purchase Order
No. PO PO-42
Supplier | Vendor X |
Date: 05/03/2024
PRT001 Widget A / Steel / PN123
750.000,00 10,00 5,00
Subtotal 760.000,00
";

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("poscan")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn extract_produces_fields_and_items() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("po.txt");
    fs::write(&input, SAMPLE_TEXT).unwrap();

    Command::cargo_bin("poscan")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("PO-42"))
        .stdout(predicate::str::contains("2024-03-05"))
        .stdout(predicate::str::contains("PRT001"))
        .stdout(predicate::str::contains("750.000,00"));
}

#[test]
fn extract_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("po.txt");
    let output = dir.path().join("result.json");
    fs::write(&input, SAMPLE_TEXT).unwrap();

    Command::cargo_bin("poscan")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"Document Number\": \"PO-42\""));
}

#[test]
fn extract_missing_input_fails() {
    Command::cargo_bin("poscan")
        .unwrap()
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure();
}

#[test]
fn extract_rejects_unknown_document_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("po.txt");
    fs::write(&input, SAMPLE_TEXT).unwrap();

    Command::cargo_bin("poscan")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .args(["--doc-type", "receipt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document type"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("poscan")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("char_whitelist"))
        .stdout(predicate::str::contains("po_document"));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poscan.json");

    Command::cargo_bin("poscan")
        .unwrap()
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .success();

    assert!(path.exists());

    // A second init without --force refuses to overwrite.
    Command::cargo_bin("poscan")
        .unwrap()
        .args(["config", "init", "--path"])
        .arg(&path)
        .assert()
        .failure();
}
