#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    db: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("expenses_test.db");
        Workspace { _temp: temp, db }
    }

    fn db(&self) -> &Path {
        &self.db
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("expense"));
        cmd.env("EXPENSES_ENV", "test")
            .env("EXPENSES_DB", self.db().as_os_str())
            .env_remove("RUST_LOG");
        cmd
    }

    fn add(&self, amount: &str, memo: &str) {
        let mut args = vec!["add", amount];
        args.extend(memo.split(' '));
        self.cmd()
            .args(&args)
            .assert()
            .success()
            .stdout("The expense has been added successfully.\n");
    }

    fn list(&self) -> String {
        let out = self.cmd().arg("list").output().unwrap();
        assert!(out.status.success());
        String::from_utf8(out.stdout).unwrap()
    }

    fn seed(&self) {
        self.add("21.32", "oil filter");
        self.add("9921.32", "cheap car");
        self.add("4231.32", "cheap bike");
    }
}

#[test]
fn test_no_command_prints_help() {
    let ws = Workspace::new();
    ws.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("search QUERY"));

    ws.cmd()
        .arg("nonsense")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("An expenses recording system"));
}

#[test]
fn test_add_then_list_round_trip() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout("No expenses found.\n");

    ws.add("100.00", "car rental");

    let first = ws.list();
    assert!(first.contains("100.00 | car rental"), "got: {first}");
    assert!(first.starts_with("  1 | "));
    assert_eq!(first, ws.list());
}

#[test]
fn test_add_validation_errors_exit_zero() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("add")
        .assert()
        .success()
        .stdout("Amount cannot be empty.\n");
    ws.cmd()
        .args(["add", "23412341243.123", "Pencil"])
        .assert()
        .success()
        .stdout("Invalid amount format. Use format like\n2341.23\n");
    ws.cmd()
        .args(["add", "234.21"])
        .assert()
        .success()
        .stdout("Memo cannot be empty.\n");
    ws.cmd()
        .args(["add", "234.21", "hello", "hello", "world"])
        .assert()
        .success()
        .stdout("Invalid memo format.\n");

    assert_eq!(ws.list(), "No expenses found.\n");
}

#[test]
fn test_search() {
    let ws = Workspace::new();
    ws.add("1000.00", "cheap car");

    ws.cmd()
        .args(["search", "cheap", "car"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000.00 | cheap car"));
    ws.cmd()
        .args(["search", "william", "guiraud"])
        .assert()
        .success()
        .stdout("No record found for this expense.\n");
    ws.cmd()
        .arg("search")
        .assert()
        .success()
        .stdout("Memo cannot be empty.\n");
}

#[test]
fn test_delete() {
    let ws = Workspace::new();
    ws.add("21.32", "oil filter");

    ws.cmd()
        .args(["delete", "abc"])
        .assert()
        .success()
        .stdout("Invalid id format.\n");
    ws.cmd()
        .arg("delete")
        .assert()
        .success()
        .stdout("The id cannot be empty.\n");
    ws.cmd()
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout("The expense with id 2 doesn't exist in the database.\n");
    assert!(ws.list().contains("oil filter"));

    ws.cmd()
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "The following expense has been deleted:\n",
        ))
        .stdout(predicate::str::contains("21.32 | oil filter"));
    assert_eq!(ws.list(), "No expenses found.\n");
}

#[test]
fn test_clear_with_arguments() {
    let ws = Workspace::new();
    ws.seed();

    for extra in ["all", "23423"] {
        ws.cmd()
            .args(["clear", extra])
            .write_stdin("y")
            .assert()
            .success()
            .stdout("The clear command doesn't take any arguments.\n");
    }
    assert_eq!(ws.list().lines().count(), 3);
}

#[test]
fn test_clear_answer_n_keeps_expenses() {
    let ws = Workspace::new();
    ws.seed();

    ws.cmd()
        .arg("clear")
        .write_stdin("n")
        .assert()
        .success()
        .stdout("This will remove all expenses. Are you sure? (y/n)\n");
    assert_eq!(ws.list().lines().count(), 3);
}

#[test]
fn test_clear_answer_y_removes_everything() {
    let ws = Workspace::new();
    ws.seed();

    ws.cmd()
        .arg("clear")
        .write_stdin("y")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "This will remove all expenses. Are you sure? (y/n)\n",
        ))
        .stdout(predicate::str::ends_with("All expenses have been deleted.\n"));
    assert_eq!(ws.list(), "No expenses found.\n");
}

#[test]
fn test_unopenable_database_is_fatal() {
    let ws = Workspace::new();
    // A directory where the database file should be
    std::fs::create_dir_all(ws.db()).unwrap();

    ws.cmd()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("database"));
}
