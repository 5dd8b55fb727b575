//! Integration tests for the NoteVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are avoided by passing values as arguments and
//! the account password through `NOTEVAULT_PASSWORD`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const KEY: &str = "12345678901234567890123456789012";
const IV: &str = "1234567890123456";

/// Helper: a Command pointing at the notevault binary with no inherited
/// NoteVault configuration.
fn notevault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("notevault").expect("binary should exist");
    for var in [
        "NOTEVAULT_ENCRYPTION_KEY",
        "NOTEVAULT_ENCRYPTION_IV",
        "NOTEVAULT_ENCRYPTION_KEY_FILE",
        "NOTEVAULT_ENCRYPTION_IV_FILE",
        "NOTEVAULT_STORE_TYPE",
        "NOTEVAULT_DB_FILE",
        "NOTEVAULT_DELETE_ON_STARTUP",
        "NOTEVAULT_LOG_LEVEL",
        "NOTEVAULT_PASSWORD",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper: a configured Command using `dir` for config and database.
fn configured(dir: &TempDir) -> Command {
    let mut cmd = notevault();
    cmd.env("NOTEVAULT_ENCRYPTION_KEY", KEY)
        .env("NOTEVAULT_ENCRYPTION_IV", IV)
        .env("NOTEVAULT_ARGON2_MEMORY_KIB", "8192")
        .env("NOTEVAULT_ARGON2_PARALLELISM", "1")
        .arg("--config-dir")
        .arg(dir.path());
    cmd
}

/// Helper: list notes as JSON.
fn list_notes(dir: &TempDir) -> Vec<serde_json::Value> {
    let output = configured(dir)
        .args(["note", "list", "--json"])
        .output()
        .expect("note list should run");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("note list --json prints a JSON array")
}

fn note_id(note: &serde_json::Value) -> String {
    note["id"].as_str().expect("note has an id").to_string()
}

// ---------------------------------------------------------------------------
// Basic surface
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    notevault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted notes"))
        .stdout(predicate::str::contains("note"))
        .stdout(predicate::str::contains("account"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("keygen"));
}

#[test]
fn version_flag_shows_version() {
    notevault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("notevault"));
}

#[test]
fn no_args_shows_help() {
    notevault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ---------------------------------------------------------------------------
// generate / keygen
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_sixteen_chars_by_default() {
    let tmp = TempDir::new().unwrap();
    let output = notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .arg("generate")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = String::from_utf8(output.stdout).unwrap();
    assert_eq!(value.trim_end().chars().count(), 16);
}

#[test]
fn generate_respects_length_and_alphabet() {
    let tmp = TempDir::new().unwrap();
    notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .args(["generate", "--length", "32", "--alphabet", "ab"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[ab]{32}\n$").unwrap());
}

#[test]
fn generate_with_empty_alphabet_fails() {
    let tmp = TempDir::new().unwrap();
    notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .args(["generate", "--alphabet", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Alphabet"));
}

#[test]
fn keygen_prints_usable_env_assignments() {
    let tmp = TempDir::new().unwrap();
    notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .arg("keygen")
        .assert()
        .success()
        .stdout(predicate::str::is_match("NOTEVAULT_ENCRYPTION_KEY=[A-Za-z0-9]{32}\n").unwrap())
        .stdout(predicate::str::is_match("NOTEVAULT_ENCRYPTION_IV=[A-Za-z0-9]{16}\n").unwrap());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn note_commands_require_a_key() {
    let tmp = TempDir::new().unwrap();
    notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .args(["note", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOTEVAULT_ENCRYPTION_KEY"));
}

#[test]
fn settings_can_come_from_config_file() {
    let tmp = TempDir::new().unwrap();
    tmp.child("notevault.toml")
        .write_str(&format!(
            "encryption_key = \"{KEY}\"\nencryption_iv = \"{IV}\"\nstore_type = \"memory\"\nargon2_memory_kib = 8192\n"
        ))
        .unwrap();

    notevault()
        .arg("--config-dir")
        .arg(tmp.path())
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet"));

    // The memory store never touches disk.
    tmp.child("notevault.db").assert(predicate::path::missing());
}

#[test]
fn broken_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    tmp.child("notevault.toml").write_str("not valid {{toml").unwrap();

    configured(&tmp)
        .args(["note", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notevault.toml"));
}

#[test]
fn unknown_log_level_fails() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["--log-level", "chatty", "note", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[test]
fn secure_note_roundtrip_through_sqlite() {
    let tmp = TempDir::new().unwrap();

    configured(&tmp)
        .args(["note", "add", "bank-pin", "4321-very-secret", "--secure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note 'bank-pin'"));

    let notes = list_notes(&tmp);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["name"], "bank-pin");
    assert_eq!(notes[0]["value"], "4321-very-secret");
    assert_eq!(notes[0]["secure"], true);

    configured(&tmp)
        .args(["note", "get", &note_id(&notes[0])])
        .assert()
        .success()
        .stdout("4321-very-secret\n");

    // The plaintext never reaches the database file.
    let db = std::fs::read(tmp.path().join("notevault.db")).unwrap();
    let needle = b"4321-very-secret";
    assert!(!db.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn table_view_masks_secure_values() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "add", "wifi", "hunter2", "--secure"])
        .assert()
        .success();
    configured(&tmp)
        .args(["note", "add", "shopping", "milk"])
        .assert()
        .success();

    configured(&tmp)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wifi"))
        .stdout(predicate::str::contains("milk"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn update_changes_value_and_secure_flag() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "add", "todo", "buy milk"])
        .assert()
        .success();
    let id = note_id(&list_notes(&tmp)[0]);

    configured(&tmp)
        .args(["note", "update", &id, "--value", "buy eggs", "--secure", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated note 'todo'"));

    let notes = list_notes(&tmp);
    assert_eq!(notes[0]["value"], "buy eggs");
    assert_eq!(notes[0]["secure"], true);

    configured(&tmp)
        .args(["note", "update", &id, "--name", "groceries"])
        .assert()
        .success();
    assert_eq!(list_notes(&tmp)[0]["name"], "groceries");
}

#[test]
fn update_without_changes_fails() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "update", "some-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn missing_note_reports_not_found() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "get", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    configured(&tmp)
        .args(["note", "update", "does-not-exist", "--value", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "add", "tmp", "x"])
        .assert()
        .success();
    let id = note_id(&list_notes(&tmp)[0]);

    configured(&tmp)
        .args(["note", "delete", &id])
        .assert()
        .success();
    configured(&tmp)
        .args(["note", "delete", &id])
        .assert()
        .success();

    assert!(list_notes(&tmp).is_empty());
    configured(&tmp)
        .args(["note", "get", &id])
        .assert()
        .failure();
}

#[test]
fn wrong_key_cannot_read_secure_notes() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .args(["note", "add", "secret", "classified", "--secure"])
        .assert()
        .success();

    configured(&tmp)
        .env("NOTEVAULT_ENCRYPTION_KEY", "abcdefghijklmnopqrstuvwxyzABCDEF")
        .args(["note", "list", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("classified").not());
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[test]
fn register_and_login() {
    let tmp = TempDir::new().unwrap();

    configured(&tmp)
        .env("NOTEVAULT_PASSWORD", "correct-horse")
        .args(["account", "register", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered a@x.com"));

    configured(&tmp)
        .env("NOTEVAULT_PASSWORD", "correct-horse")
        .args(["account", "login", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as a@x.com"));

    configured(&tmp)
        .env("NOTEVAULT_PASSWORD", "wrong-horse")
        .args(["account", "login", "a@x.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    configured(&tmp)
        .env("NOTEVAULT_PASSWORD", "correct-horse")
        .args(["account", "login", "nobody@x.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn duplicate_registration_fails() {
    let tmp = TempDir::new().unwrap();
    for expect_success in [true, false] {
        let assert = configured(&tmp)
            .env("NOTEVAULT_PASSWORD", "correct-horse")
            .args(["account", "register", "a@x.com"])
            .assert();
        if expect_success {
            assert.success();
        } else {
            assert
                .failure()
                .stderr(predicate::str::contains("already exists"));
        }
    }
}

#[test]
fn short_password_is_rejected() {
    let tmp = TempDir::new().unwrap();
    configured(&tmp)
        .env("NOTEVAULT_PASSWORD", "short")
        .args(["account", "register", "a@x.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}
