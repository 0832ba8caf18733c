//! GnuPG CLI wrapper.
//!
//! Only key import is needed: a user's public key file is imported into a
//! key store so git-crypt can add the user by fingerprint.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::core::constants;
use crate::error::{GpgError, Result};

/// Prefix of machine-readable status lines (`--status-fd`).
const STATUS_PREFIX: &str = "[GNUPG:]";

/// Parameters for `gpg --import`.
///
/// gpg runs in the caller's directory, so relative key paths resolve the
/// same way they do for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub key_file_paths: Vec<PathBuf>,
    pub home_directory: Option<PathBuf>,
    pub with_status: bool,
}

/// One `[GNUPG:] KEYWORD args...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub keyword: String,
    pub args: Vec<String>,
}

impl StatusLine {
    /// Parse a status line, ignoring anything without the status prefix.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(STATUS_PREFIX)?;
        let mut parts = rest.split_whitespace();
        let keyword = parts.next()?.to_string();
        Some(Self {
            keyword,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub status: Vec<StatusLine>,
}

impl ImportResult {
    pub fn from_status_output(output: &str) -> Self {
        Self {
            status: output.lines().filter_map(StatusLine::parse).collect(),
        }
    }

    /// Fingerprint from the first `IMPORT_OK` line.
    pub fn fingerprint(&self) -> Option<&str> {
        self.status
            .iter()
            .find(|line| line.keyword == "IMPORT_OK")
            .and_then(|line| line.args.get(1))
            .map(String::as_str)
    }
}

/// Key-management operations.
pub trait Gpg {
    fn import(&self, import: &Import) -> Result<ImportResult>;
}

/// [`Gpg`] backed by the `gpg` binary.
#[derive(Debug, Clone)]
pub struct GpgCli {
    binary: String,
}

impl GpgCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn args(import: &Import) -> Vec<String> {
        let mut args = vec!["--batch".to_string(), "--no-tty".to_string()];
        if let Some(home) = &import.home_directory {
            args.push("--homedir".to_string());
            args.push(home.display().to_string());
        }
        if import.with_status {
            args.push("--status-fd".to_string());
            args.push("1".to_string());
        }
        args.push("--import".to_string());
        args.extend(import.key_file_paths.iter().map(|p| p.display().to_string()));
        args
    }
}

impl Default for GpgCli {
    fn default() -> Self {
        Self::new(constants::GPG_BINARY)
    }
}

impl Gpg for GpgCli {
    fn import(&self, import: &Import) -> Result<ImportResult> {
        let binary =
            which::which(&self.binary).map_err(|_| GpgError::NotFound(self.binary.clone()))?;
        let args = Self::args(import);
        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %command_line, "running gpg");

        let output = Command::new(binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(GpgError::Spawn)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(stdout = %stdout, "gpg output");

        if !output.status.success() {
            return Err(GpgError::CommandFailed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(ImportResult::from_status_output(&stdout))
    }
}
