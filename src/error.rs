//! Error types.
//!
//! Each concern has its own error enum; they all fold into [`Error`] so
//! task actions can propagate any of them with `?`.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::core::name::TaskName;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    GitCrypt(#[from] GitCryptError),

    #[error(transparent)]
    Gpg(#[from] GpgError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Task definition and invocation errors.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A mandatory parameter (usually a collaborator task name) was not set.
    #[error("required parameter unset: {0}")]
    RequiredParameterUnset(String),

    /// A collaborator task name was set but resolves to nothing.
    #[error("the task with name {0} does not exist")]
    DependencyTaskMissing(TaskName),

    #[error("a task named {0} is already defined")]
    AlreadyDefined(TaskName),

    #[error("invalid task name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("conflicting parameters: {0}")]
    ConflictingParameters(String),
}

/// Failures running the `git-crypt` CLI.
#[derive(Error, Debug)]
pub enum GitCryptError {
    #[error("git-crypt binary not found: {0}")]
    NotFound(String),

    #[error("failed to spawn git-crypt: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Failures running the `gpg` CLI.
#[derive(Error, Debug)]
pub enum GpgError {
    #[error("gpg binary not found: {0}")]
    NotFound(String),

    #[error("failed to spawn gpg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("gpg reported no imported key for {0}")]
    NoImportedKey(PathBuf),
}

/// Failures running user-configured command tasks.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command task has no program")]
    Empty,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Commit message template errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template field '{field}' in \"{template}\"")]
    UnknownField { field: String, template: String },

    #[error("unclosed '{{' in template \"{0}\"")]
    Unclosed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
