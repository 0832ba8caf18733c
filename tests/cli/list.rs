//! Tests for `git-crypt-tasks list`.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_list_without_config_shows_standard_tasks() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    let out = stdout(&output);
    for task in [
        "init",
        "lock",
        "unlock",
        "add_user_by_id",
        "add_user_by_key_path",
        "add_users",
        "install",
        "uninstall",
        "reinstall",
    ] {
        assert!(out.contains(task), "missing {task} in: {out}");
    }
    assert!(out.contains("Initialise git-crypt."));
}

#[test]
fn test_list_json() {
    let t = Test::new();

    let output = t.list_json();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 9);
    assert_eq!(json["tasks"][0]["name"], "init");
    assert_eq!(json["tasks"][0]["description"], "Initialise git-crypt.");
}

#[test]
fn test_list_includes_command_tasks() {
    let t = Test::new();
    t.write_config("", "");

    t.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("git:commit"))
        .stdout(predicate::str::contains("Commit all changes."));
}

#[test]
fn test_namespace_flag_prefixes_tasks() {
    let t = Test::new();

    let output = t.cmd().args(["--namespace", "git_crypt", "list", "--json"]).output().unwrap();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<_> = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.iter().all(|name| name.starts_with("git_crypt:")));
    assert!(names.contains(&"git_crypt:install".to_string()));
}

#[test]
fn test_namespace_from_config() {
    let t = Test::new();
    t.write_config("namespace = \"secrets:git_crypt\"", "");

    t.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("secrets:git_crypt:reinstall"));
}
