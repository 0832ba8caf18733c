//! Tests for `git-crypt-tasks run` with single-step tasks.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_run_init() {
    let t = Test::new();
    t.write_config("", "");

    let output = t.run("init", &[]);
    assert_success(&output);
    assert_eq!(t.calls(), vec!["git-crypt init"]);
    assert!(stdout(&output).contains("init"));
}

#[test]
fn test_run_init_with_key_name() {
    let t = Test::new();
    t.write_config("key_name = \"staging\"", "");

    assert_success(&t.run("init", &[]));
    assert_eq!(t.calls(), vec!["git-crypt init --key-name staging"]);
}

#[test]
fn test_run_lock_with_flags() {
    let t = Test::new();
    t.write_config("lock_when_unclean = true\nlock_all_keys = true", "");

    assert_success(&t.run("lock", &[]));
    assert_eq!(t.calls(), vec!["git-crypt lock --force --all"]);
}

#[test]
fn test_run_lock_when_already_locked_succeeds() {
    let t = Test::new();
    t.write_config("", "");
    t.fail_lock();

    let output = t.run("lock", &[]);
    assert_success(&output);
    assert_stderr_contains(&output, "already locked");
}

#[test]
fn test_run_unlock_with_key_paths() {
    let t = Test::new();
    t.write_config("unlock_key_paths = [\"/keys/one\", \"/keys/two\"]", "");

    assert_success(&t.run("unlock", &[]));
    assert_eq!(t.calls(), vec!["git-crypt unlock /keys/one /keys/two"]);
}

#[test]
fn test_run_command_task_appends_arguments() {
    let t = Test::new();
    t.write_config("", "");

    assert_success(&t.run("git:commit", &["Some message"]));
    assert_eq!(t.calls(), vec!["git commit -a -m Some message"]);
}

#[test]
fn test_run_add_user_by_id_with_argument() {
    let t = Test::new();
    t.write_config("", "");

    assert_success(&t.run("add_user_by_id", &["carol@example.com"]));
    assert_eq!(
        t.calls(),
        vec!["git-crypt add-gpg-user --no-commit carol@example.com"]
    );
}

#[test]
fn test_run_add_user_by_key_path_uses_temporary_store() {
    let t = Test::new();
    let keys = t.key_files(&["carol.gpg"]);
    t.write_config("", "");

    let key = keys.join("carol.gpg");
    assert_success(&t.run("add_user_by_key_path", &[key.to_str().unwrap()]));

    let calls = t.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("gpg --batch --no-tty --homedir "));
    assert!(calls[0].ends_with(&format!("--status-fd 1 --import {}", key.display())));
    assert_eq!(
        calls[1],
        format!("git-crypt add-gpg-user --no-commit --trusted {FINGERPRINT}")
    );
}

#[test]
fn test_run_unknown_task_fails_with_hint() {
    let t = Test::new();

    t.cmd()
        .args(["run", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the task with name nope does not exist"))
        .stderr(predicate::str::contains("run: git-crypt-tasks list"));
}

#[test]
fn test_run_with_missing_git_crypt_binary_fails() {
    let t = Test::new();
    t.write_config("", "");
    std::fs::remove_file(t.tool("git-crypt")).unwrap();

    let output = t.run("init", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "git-crypt binary not found");
    assert_stderr_contains(&output, "install git-crypt");
}
