//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn memocalc(base: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("memocalc").expect("binary not found");
    cmd.env("CALCULATOR_BASE_DIR", base.path())
        .env_remove("CALCULATOR_MAX_HISTORY_SIZE")
        .env_remove("CALCULATOR_MAX_UNDO_DEPTH")
        .env_remove("CALCULATOR_AUTO_SAVE")
        .env_remove("CALCULATOR_PRECISION")
        .env_remove("CALCULATOR_MAX_INPUT_VALUE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculator"))
        .stdout(predicate::str::contains("CALCULATOR_MAX_HISTORY_SIZE"));
}

#[test]
fn version_flag() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("memocalc"));
}

#[test]
fn add_and_exit() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .write_stdin("add\n2\n3\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculator started"))
        .stdout(predicate::str::contains("Result: 5"))
        .stdout(predicate::str::contains("History saved successfully."))
        .stdout(predicate::str::contains("Goodbye!"));

    let history = std::fs::read_to_string(base.path().join("history/calculator_history.csv")).unwrap();
    assert!(history.starts_with("operation,operand1,operand2,result,timestamp"));
    assert!(history.contains("Addition,2,3,5,"));
}

#[test]
fn log_file_records_calculations() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .write_stdin("multiply\n6\n7\nexit\n")
        .assert()
        .success();

    let log = std::fs::read_to_string(base.path().join("logs/calculator.log")).unwrap();
    assert!(log.contains("Calculator initialized with configuration"));
    assert!(log.contains("Calculation performed: Multiplication (6, 7) = 42"));
}

#[test]
fn history_survives_restart() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .write_stdin("power\n2\n10\nexit\n")
        .assert()
        .success();

    memocalc(&base)
        .write_stdin("history\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Power(2, 10) = 1024"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .write_stdin("divide\n1\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Division by zero is not allowed"))
        .stdout(predicate::str::contains("Input terminated. Exiting..."));
}

#[test]
fn precision_env_controls_result() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .env("CALCULATOR_PRECISION", "3")
        .write_stdin("divide\n2\n3\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 0.667"));
}

#[test]
fn max_input_value_env_rejects_large_operands() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .env("CALCULATOR_MAX_INPUT_VALUE", "100")
        .write_stdin("add\n1000\n1\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Value exceeds maximum allowed: 100"));
}

#[test]
fn invalid_env_value_is_rejected() {
    let base = TempDir::new().unwrap();
    memocalc(&base)
        .env("CALCULATOR_PRECISION", "0")
        .write_stdin("exit\n")
        .assert()
        .failure();
}

#[test]
fn unusable_base_dir_is_fatal() {
    let base = TempDir::new().unwrap();
    let blocker = base.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();

    memocalc(&base)
        .env("CALCULATOR_BASE_DIR", &blocker)
        .write_stdin("exit\n")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Fatal error"));
}
