//! diary / clockify バイナリの結合テスト

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn diary(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("diary").unwrap();
    cmd.env("HOME", home)
        .env("RUST_LOG", "warn")
        .arg("--db")
        .arg(home.join("diary.db"));
    cmd
}

#[test]
fn test_add_then_list() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .args(["add-entry", "--log", "朝ランニングをした", "--tags", "運動"])
        .assert()
        .success()
        .stdout(predicate::str::contains("エントリを追加しました（ID: 1）"));

    diary(temp_dir.path())
        .arg("list-entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("朝ランニングをした"))
        .stdout(predicate::str::contains("運動"));
}

#[test]
fn test_add_prompts_when_log_missing() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .arg("add-entry")
        .write_stdin("prompted log\nwork\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ログを入力してください"));

    diary(temp_dir.path())
        .args(["search-entries", "PROMPTED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prompted log"))
        .stdout(predicate::str::contains("work"));
}

#[test]
fn test_add_rejects_empty_log() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .args(["add-entry", "--log", "   ", "--tags", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ログが空です"));
}

#[test]
fn test_list_empty() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .arg("list-entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("エントリはありません"));
}

#[test]
fn test_search_no_match() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .args(["add-entry", "--log", "hello", "--tags", ""])
        .assert()
        .success();

    diary(temp_dir.path())
        .args(["search-entries", "absent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("一致するエントリはありません"));
}

#[test]
fn test_delete_existing_and_missing() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .args(["add-entry", "--log", "to be removed", "--tags", ""])
        .assert()
        .success();

    diary(temp_dir.path())
        .args(["delete-entry", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID 1 のエントリを削除しました"));

    diary(temp_dir.path())
        .args(["delete-entry", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID 1 のエントリは見つかりませんでした"));

    diary(temp_dir.path())
        .arg("list-entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("to be removed").not());
}

#[test]
fn test_show_commands() {
    let temp_dir = TempDir::new().unwrap();

    diary(temp_dir.path())
        .arg("show-commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-entry"))
        .stdout(predicate::str::contains("delete-entry"));
}

#[test]
fn test_unavailable_storage_fails() {
    let temp_dir = TempDir::new().unwrap();
    // ディレクトリをDBファイルとして指定すると開けない
    let mut cmd = Command::cargo_bin("diary").unwrap();
    cmd.env("HOME", temp_dir.path())
        .arg("--db")
        .arg(temp_dir.path())
        .arg("list-entries")
        .assert()
        .failure();
}

#[test]
fn test_clockify_requires_credentials() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("clockify").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("API_KEY")
        .env_remove("WORKSPACE_ID")
        .arg("logs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_KEY"));
}
