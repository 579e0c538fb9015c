//! Integration tests for the `tagbundle` CLI binary.
//!
//! Uses `assert_cmd` and `predicates` to exercise the convert and event
//! subcommands through the actual binary: stdin/stdout piping, file I/O,
//! strict-vs-lenient error behavior.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the purchase.json fixture.
fn purchase_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/purchase.json")
}

// ─────────────────────────────────────────────────────────────────────────────
// Convert subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_stdin_to_stdout() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .arg("convert")
        .write_stdin(r#"{"currency":"AUD","value":29.98}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("currency: string = AUD"))
        .stdout(predicate::str::contains("value: double = 29.98"));
}

#[test]
fn convert_file_to_stdout() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["convert", "-i", purchase_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("items: bundle[2]"))
        .stdout(predicate::str::contains("item_id: string = SKU_1"))
        // Null and empty-array keys are dropped from the listing.
        .stdout(predicate::str::contains("coupon").not())
        .stdout(predicate::str::contains("promotions").not());
}

#[test]
fn convert_file_to_file() {
    let output_path = "/tmp/tagbundle-test-convert-output.txt";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["convert", "-i", purchase_json_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("transaction_id: string = T_12345"));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn convert_reports_typed_arrays() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .arg("convert")
        .write_stdin(r#"{"tags":["a","b"],"counts":[1,2,3]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("tags: string[] = [a, b]"))
        .stdout(predicate::str::contains("counts: int[] = [1, 2, 3]"));
}

#[test]
fn convert_invalid_json_fails() {
    // Strict subcommand: invalid JSON is a hard error.
    Command::cargo_bin("tagbundle")
        .unwrap()
        .arg("convert")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert JSON params"));
}

#[test]
fn convert_non_object_top_level_fails() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .arg("convert")
        .write_stdin("[1,2,3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an object"));
}

#[test]
fn convert_missing_input_file_fails() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["convert", "-i", "/nonexistent/params.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Event subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn event_prints_name_and_params() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["event", "--name", "purchase", "-i", purchase_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("event: purchase"))
        .stdout(predicate::str::contains("currency: string = AUD"));
}

#[test]
fn event_with_invalid_json_still_succeeds() {
    // Lenient path mirrors the bridge: warn, emit empty params, exit 0.
    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["event", "--name", "purchase"])
        .write_stdin("not json {{{")
        .assert()
        .success()
        .stdout(predicate::str::contains("event: purchase"))
        .stdout(predicate::str::contains("params: (none)"))
        .stderr(predicate::str::contains("warning"));
}

#[test]
fn event_with_empty_object_reports_no_params() {
    Command::cargo_bin("tagbundle")
        .unwrap()
        .args(["event", "--name", "screen_view"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("params: (none)"));
}
