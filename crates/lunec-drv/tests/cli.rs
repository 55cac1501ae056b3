//! CLI tests for the `lunec` binary.
//!
//! These drive the real executable: exit codes, stdout dumps, and stderr
//! diagnostics.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lunec_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lunec"))
}

fn write_source(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write test source");
    path
}

fn lunec(input: &Path) -> Command {
    let mut cmd = Command::new(lunec_bin());
    cmd.arg(input);
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(lunec_bin())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lunec"));
}

#[test]
fn test_cli_version() {
    Command::new(lunec_bin())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lunec"));
}

#[test]
fn test_compile_prints_ast_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "def x = 1 + 2 * 3;\n");

    lunec(&input)
        .assert()
        .success()
        .stdout("Var x = (+ 1 (* 2 3))\n");
}

#[test]
fn test_compile_module_with_function() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "module m;\ndef f : fn() => { 42; };\n");

    lunec(&input)
        .assert()
        .success()
        .stdout("Module m\nConst f = Fn() => { 42 }\n");
}

#[test]
fn test_emit_tokens() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "def x = 42;\n");

    lunec(&input)
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "token[0] = { KwDef, \"def\" } 1:1",
        ))
        .stdout(predicate::str::contains(
            "token[3] = { IntegerLiteral, \"42\" } 1:9",
        ))
        .stdout(predicate::str::contains("Var x").not());
}

#[test]
fn test_emit_tokens_and_ast() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "def x = 42;\n");

    lunec(&input)
        .arg("--emit-tokens")
        .arg("--emit-ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("token[0]"))
        .stdout(predicate::str::contains("Var x = 42"));
}

#[test]
fn test_diagnostic_exits_one_with_snippet() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "def x = 1 + ;\n");

    lunec(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(":1:13: error:"))
        .stderr(predicate::str::contains("expression"))
        .stderr(predicate::str::contains("| def x = 1 + ;"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_lex_diagnostic_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "main.ln", "#( unclosed\n");

    lunec(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(":1:1: error:"))
        .stderr(predicate::str::contains("unterminated block comment"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("does_not_exist.ln");

    lunec(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("does_not_exist.ln"));
}

#[test]
fn test_empty_file_succeeds_quietly() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "empty.ln", "");

    lunec(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
