//! git-crypt CLI wrapper.
//!
//! ## Requirements
//!
//! - `git-crypt` must be installed (or configured via `[tools] git_crypt`)
//! - Commands run inside the configured repository root

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::{GitCryptError, Result};

/// Environment variables passed to a git-crypt invocation.
pub type Environment = Vec<(String, String)>;

/// Parameters for `git-crypt add-gpg-user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGpgUser {
    pub gpg_user_id: String,
    pub key_name: Option<String>,
    pub no_commit: bool,
    pub trusted: bool,
}

/// Operations provided by git-crypt.
pub trait GitCrypt {
    /// `git-crypt init [-k KEY_NAME]`
    fn init(&self, key_name: Option<&str>) -> Result<()>;

    /// `git-crypt lock [-k KEY_NAME] [--force] [--all]`
    fn lock(&self, key_name: Option<&str>, force: bool, all: bool) -> Result<()>;

    /// `git-crypt unlock [KEY_FILE ...]`
    fn unlock(&self, key_files: Option<&[PathBuf]>) -> Result<()>;

    /// `git-crypt add-gpg-user [-k KEY_NAME] [--no-commit] [--trusted] ID`
    fn add_gpg_user(&self, user: &AddGpgUser, env: &Environment) -> Result<()>;
}

/// [`GitCrypt`] backed by the `git-crypt` binary.
#[derive(Debug, Clone)]
pub struct GitCryptCli {
    binary: String,
    repository: PathBuf,
}

impl GitCryptCli {
    pub fn new(binary: impl Into<String>, repository: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            repository: repository.into(),
        }
    }

    fn execute(&self, args: &[String], env: &Environment) -> Result<()> {
        let binary = which::which(&self.binary)
            .map_err(|_| GitCryptError::NotFound(self.binary.clone()))?;

        let command_line = std::iter::once(self.binary.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %command_line, "running git-crypt");

        let output = Command::new(binary)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.repository)
            .stdin(Stdio::null())
            .output()
            .map_err(GitCryptError::Spawn)?;

        trace!(stdout = %String::from_utf8_lossy(&output.stdout), "git-crypt output");

        if !output.status.success() {
            return Err(GitCryptError::CommandFailed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn key_name_args(args: &mut Vec<String>, key_name: Option<&str>) {
    if let Some(name) = key_name {
        args.push("--key-name".to_string());
        args.push(name.to_string());
    }
}

impl GitCrypt for GitCryptCli {
    fn init(&self, key_name: Option<&str>) -> Result<()> {
        let mut args = vec!["init".to_string()];
        key_name_args(&mut args, key_name);
        self.execute(&args, &Environment::new())
    }

    fn lock(&self, key_name: Option<&str>, force: bool, all: bool) -> Result<()> {
        let mut args = vec!["lock".to_string()];
        key_name_args(&mut args, key_name);
        if force {
            args.push("--force".to_string());
        }
        if all {
            args.push("--all".to_string());
        }
        self.execute(&args, &Environment::new())
    }

    fn unlock(&self, key_files: Option<&[PathBuf]>) -> Result<()> {
        let mut args = vec!["unlock".to_string()];
        for file in key_files.unwrap_or_default() {
            args.push(file.display().to_string());
        }
        self.execute(&args, &Environment::new())
    }

    fn add_gpg_user(&self, user: &AddGpgUser, env: &Environment) -> Result<()> {
        let mut args = vec!["add-gpg-user".to_string()];
        key_name_args(&mut args, user.key_name.as_deref());
        if user.no_commit {
            args.push("--no-commit".to_string());
        }
        if user.trusted {
            args.push("--trusted".to_string());
        }
        args.push(user.gpg_user_id.clone());
        self.execute(&args, env)
    }
}
