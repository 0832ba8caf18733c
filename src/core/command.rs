//! Command tasks.
//!
//! A command task runs an external program with its configured arguments
//! followed by the invocation arguments. They stand in for the commit,
//! provision-secrets and destroy-secrets collaborators, e.g. a `git:commit`
//! task running `git commit -a -m <message>`.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::core::name::TaskName;
use crate::core::registry::{Context, Task};
use crate::error::{CommandError, Result};

/// A command task as declared in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSpec {
    pub name: TaskName,
    #[serde(default)]
    pub description: Option<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Run {}.", self.program))
    }
}

/// Runs a program in the repository root.
#[derive(Debug, Clone)]
pub struct CommandTask {
    program: String,
    args: Vec<String>,
    directory: PathBuf,
}

impl CommandTask {
    pub fn new(spec: &CommandSpec, directory: impl Into<PathBuf>) -> Self {
        Self {
            program: spec.program.clone(),
            args: spec.args.clone(),
            directory: directory.into(),
        }
    }
}

impl Task for CommandTask {
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(CommandError::Empty.into());
        }

        let all_args: Vec<&str> = self
            .args
            .iter()
            .chain(args.iter())
            .map(String::as_str)
            .collect();
        let command_line = std::iter::once(self.program.as_str())
            .chain(all_args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(task = %ctx.name(), command = %command_line, "running command task");

        let status = Command::new(&self.program)
            .args(&all_args)
            .current_dir(&self.directory)
            .status()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: command_line,
                status,
            }
            .into());
        }
        Ok(())
    }
}
