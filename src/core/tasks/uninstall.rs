use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};

use super::{maybe_commit, maybe_invoke, Operation, Tools};
use crate::core::constants::{messages, STATE_DIRECTORIES};
use crate::core::name::{self, TaskName};
use crate::core::registry::{require, Context, Task};
use crate::core::template::Fields;
use crate::error::Result;

/// Lock the repository, remove git-crypt's state directories, optionally
/// destroy secrets and optionally commit.
pub struct Uninstall {
    pub lock_task_name: Option<TaskName>,
    pub destroy_secrets_task_name: Option<TaskName>,
    pub commit_task_name: Option<TaskName>,
    pub commit_message_template: String,
    pub repository: PathBuf,
}

impl Uninstall {
    pub fn new(tools: &Tools) -> Self {
        Self {
            lock_task_name: Some(name::literal("lock")),
            destroy_secrets_task_name: None,
            commit_task_name: None,
            commit_message_template: messages::UNINSTALL.to_string(),
            repository: tools.repository.clone(),
        }
    }

    fn delete_state_directories(&self) -> Result<()> {
        for dir in STATE_DIRECTORIES {
            let path = self.repository.join(dir);
            debug!(path = %path.display(), "removing git-crypt state");
            match std::fs::remove_dir_all(&path) {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }
}

impl Operation for Uninstall {
    const DEFAULT_NAME: &'static str = "uninstall";
    const DESCRIPTION: &'static str = "Uninstall git-crypt.";
}

impl Task for Uninstall {
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        info!("Uninstalling git-crypt...");
        let lock = require("lock_task_name", self.lock_task_name.as_ref())?;

        ctx.invoke(lock, args)?;
        self.delete_state_directories()?;
        maybe_invoke(ctx, self.destroy_secrets_task_name.as_ref(), args)?;
        maybe_commit(
            ctx,
            self.commit_task_name.as_ref(),
            &self.commit_message_template,
            Fields::new(),
            args,
        )
    }
}
