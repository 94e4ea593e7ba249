// crates/contact-book-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for config and seed workflows.
// Purpose: Ensure commands succeed on valid input and fail closed otherwise.
// Dependencies: contact-book-cli binary, contact-book-core, contact-book-store-sqlite
// ============================================================================

//! ## Overview
//! Runs the `contact-book` binary for config validation, the example config,
//! and seeding, then inspects the resulting `SQLite` store directly.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use contact_book_core::ContactId;
use contact_book_core::ContactStore;
use contact_book_store_sqlite::SqliteContactStore;
use contact_book_store_sqlite::SqliteStoreConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn contact_book_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_contact-book"))
}

fn run(args: &[&str]) -> Output {
    Command::new(contact_book_bin())
        .args(args)
        .env_remove("CONTACT_BOOK_CONFIG")
        .output()
        .expect("run contact-book")
}

fn write_sqlite_config(dir: &Path) -> (PathBuf, PathBuf) {
    let db_path = dir.join("contacts.sqlite");
    let config_path = dir.join("contact-book.toml");
    let config = format!("[store]\ntype = \"sqlite\"\npath = \"{}\"\n", db_path.display());
    fs::write(&config_path, config).unwrap();
    (config_path, db_path)
}

fn open_store(db_path: &Path) -> SqliteContactStore {
    SqliteContactStore::new(&SqliteStoreConfig::at(db_path)).unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_flag_prints_package_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("contact-book {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_example_validates_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["config", "example"]);
    assert!(output.status.success());
    let example = stdout(&output);
    assert!(example.contains("[server]"));
    assert!(example.contains("[pagination]"));

    let path = dir.path().join("example.toml");
    fs::write(&path, example).unwrap();
    let output = run(&["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Config valid.");
}

#[test]
fn config_validate_rejects_invalid_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[pagination]\npage_size = 0\n").unwrap();
    let output = run(&["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

#[test]
fn config_validate_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let output = run(&["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

#[test]
fn seed_inserts_requested_count() {
    let dir = tempfile::tempdir().unwrap();
    let (config_path, db_path) = write_sqlite_config(dir.path());
    let output = run(&[
        "seed",
        "--config",
        config_path.to_str().unwrap(),
        "--count",
        "12",
        "--rng-seed",
        "5",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Inserted 12 contacts"));
    assert_eq!(open_store(&db_path).count(None).unwrap(), 12);
}

#[test]
fn seed_reset_replaces_rows_and_restarts_ids() {
    let dir = tempfile::tempdir().unwrap();
    let (config_path, db_path) = write_sqlite_config(dir.path());
    let config = config_path.to_str().unwrap();
    assert!(run(&["seed", "--config", config, "--count", "8"]).status.success());

    let output = run(&["seed", "--config", config, "--count", "3", "--reset"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Removed 8 existing contacts."));

    let store = open_store(&db_path);
    assert_eq!(store.count(None).unwrap(), 3);
    let first = store.fetch(None, 1, 0).unwrap();
    assert_eq!(first[0].id, ContactId::from_raw(1).unwrap());
}

#[test]
fn seed_refuses_memory_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.toml");
    fs::write(&path, "[store]\ntype = \"memory\"\n").unwrap();
    let output = run(&["seed", "--config", path.to_str().unwrap(), "--count", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Refusing to seed a memory store"));
}

#[test]
fn seed_rejects_zero_count() {
    let output = run(&["seed", "--count", "0"]);
    assert!(!output.status.success());
}
