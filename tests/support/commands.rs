//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a git-crypt-tasks command running in the test repository.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("git-crypt-tasks").expect("failed to find git-crypt-tasks binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("GIT_CRYPT_TASKS_CONFIG");
        cmd.env_remove("GIT_CRYPT_TASKS_LOG");
        cmd
    }

    /// Shortcut for `git-crypt-tasks run <task> [args]`.
    pub fn run(&self, task: &str, args: &[&str]) -> Output {
        self.cmd()
            .arg("run")
            .arg(task)
            .args(args)
            .output()
            .expect("failed to run git-crypt-tasks run")
    }

    /// Shortcut for `git-crypt-tasks list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run git-crypt-tasks list")
    }

    /// Shortcut for `git-crypt-tasks list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run git-crypt-tasks list --json")
    }
}
