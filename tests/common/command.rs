use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Timestamp of every commit made through [`lit_commit`]
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_lit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("");

    repository_dir
}

/// Repository with `a.txt` ("one") committed as "first"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a.txt"),
        "one".to_string(),
    ));
    run_lit_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    lit_commit(init_repository_dir.path(), "first")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_lit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lit").expect("Failed to find lit binary");
    cmd.env_remove("LIT_STRICT");
    cmd.env("LIT_COMMIT_DATE", COMMIT_DATE);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn lit_commit(dir: &Path, message: &str) -> Command {
    run_lit_command(dir, &["commit", message])
}

/// Write `content` to `name`, stage it and commit it
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_lit_command(dir, &["add", name]).assert().success().stdout("");
    lit_commit(dir, message).assert().success().stdout("");
}

pub fn lit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_lit_command(dir, args)
        .output()
        .expect("Failed to run lit");

    String::from_utf8(output.stdout).expect("lit printed invalid UTF-8")
}

/// Full id of the active branch's tip
pub fn head_id(dir: &Path) -> String {
    let lit_dir = dir.join(".lit");
    let branch = std::fs::read_to_string(lit_dir.join("HEAD")).expect("Failed to read HEAD");

    std::fs::read_to_string(lit_dir.join("branches").join(branch.trim()))
        .expect("Failed to read active branch")
        .trim()
        .to_string()
}

/// Commit ids printed by `log`, newest first
pub fn logged_ids(dir: &Path) -> Vec<String> {
    lit_stdout(dir, &["log"])
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
