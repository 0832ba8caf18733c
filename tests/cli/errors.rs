//! Tests for error handling and CLI flags.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert!(stdout(&output).contains("git-crypt-tasks") || stdout(&output).contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    assert_failure(&t.cmd().arg("unknown-command").output().unwrap());
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("git-crypt-tasks") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    assert_success(&t.cmd().args(["completions", "zsh"]).output().unwrap());
}

#[test]
fn test_completions_cover_every_clap_complete_shell() {
    let t = Test::new();

    for shell in ["bash", "elvish", "fish", "powershell", "zsh"] {
        t.cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("git-crypt-tasks"));
    }
}

#[test]
fn test_completions_unknown_shell_fails() {
    let t = Test::new();

    assert_failure(&t.cmd().args(["completions", "tcsh"]).output().unwrap());
}

#[test]
fn test_explicit_missing_config_fails() {
    let t = Test::new();

    t.cmd()
        .args(["--config", "missing.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read missing.toml"));
}

#[test]
fn test_config_from_env() {
    let t = Test::new();
    std::fs::write(
        t.dir.path().join("custom.toml"),
        "[options]\nnamespace = \"vault\"\n",
    )
    .unwrap();

    t.cmd()
        .env("GIT_CRYPT_TASKS_CONFIG", "custom.toml")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("vault:install"));
}

#[test]
fn test_malformed_config_fails() {
    let t = Test::new();
    std::fs::write(t.dir.path().join(".git-crypt-tasks.toml"), "[options\n").unwrap();

    t.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn test_unknown_option_fails() {
    let t = Test::new();
    std::fs::write(
        t.dir.path().join(".git-crypt-tasks.toml"),
        "[options]\nno_such_option = true\n",
    )
    .unwrap();

    assert_failure(&t.cmd().arg("list").output().unwrap());
}

#[test]
fn test_invalid_namespace_flag_fails() {
    let t = Test::new();

    t.cmd()
        .args(["--namespace", "a::b", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("options.namespace"));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();

    assert_success(&t.cmd().args(["--verbose", "list"]).output().unwrap());
}
