use crate::common::command::{head_id, init_repository_dir, repository_dir, run_lit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_the_repository_layout(init_repository_dir: TempDir) {
    let lit_dir = init_repository_dir.child(".lit");

    lit_dir.child("objects").assert(predicate::path::is_dir());
    lit_dir.child("branches/master").assert(predicate::path::is_file());
    lit_dir.child("HEAD").assert("master");
    lit_dir.child("index").assert(predicate::path::is_file());
    lit_dir.child("tracked").assert("");
}

#[rstest]
fn init_twice_is_reported(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("A lit version-control system already exists in the current directory.\n");
}

#[rstest]
fn independent_repositories_share_the_root_commit(init_repository_dir: TempDir) {
    let other_dir = TempDir::new().unwrap();
    run_lit_command(other_dir.path(), &["init"]).assert().success();

    let root_id = head_id(init_repository_dir.path());

    assert_eq!(root_id, head_id(other_dir.path()));
    assert_eq!(root_id.len(), 40);
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["add", "a.txt"])]
#[case(&["merge", "dev"])]
fn commands_outside_a_repository_are_rejected(repository_dir: TempDir, #[case] args: &[&str]) {
    run_lit_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Not in an initialized lit directory.\n");

    repository_dir
        .child(".lit")
        .assert(predicate::path::missing());
}

#[rstest]
#[case(&[], "Please enter a command.\n")]
#[case(&["push"], "No command with that name exists.\n")]
#[case(&["add"], "Incorrect operands.\n")]
#[case(&["checkout"], "Incorrect operands.\n")]
#[case(&["branch", "a", "b"], "Incorrect operands.\n")]
fn usage_errors_print_a_message(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    run_lit_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout(message.to_string());
}

#[rstest]
fn strict_mode_fails_on_reported_errors(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["--strict", "rm", "ghost.txt"])
        .assert()
        .failure()
        .code(1)
        .stdout("No reason to remove the file.\n");

    run_lit_command(init_repository_dir.path(), &["push"])
        .env("LIT_STRICT", "1")
        .assert()
        .failure()
        .stdout("No command with that name exists.\n");

    run_lit_command(init_repository_dir.path(), &["log"])
        .env("LIT_STRICT", "1")
        .assert()
        .success();
}
