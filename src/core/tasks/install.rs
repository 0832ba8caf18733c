use tracing::info;

use super::{maybe_commit, maybe_invoke, Operation};
use crate::core::constants::messages;
use crate::core::name::{self, TaskName};
use crate::core::registry::{require, Context, Task};
use crate::core::template::Fields;
use crate::error::Result;

/// Initialise git-crypt, optionally provision secrets, add users and
/// optionally commit.
pub struct Install {
    pub init_task_name: Option<TaskName>,
    pub add_users_task_name: Option<TaskName>,
    pub provision_secrets_task_name: Option<TaskName>,
    pub commit_task_name: Option<TaskName>,
    pub commit_message_template: String,
}

impl Default for Install {
    fn default() -> Self {
        Self {
            init_task_name: Some(name::literal("init")),
            add_users_task_name: Some(name::literal("add_users")),
            provision_secrets_task_name: None,
            commit_task_name: None,
            commit_message_template: messages::INSTALL.to_string(),
        }
    }
}

impl Operation for Install {
    const DEFAULT_NAME: &'static str = "install";
    const DESCRIPTION: &'static str = "Install git-crypt.";
}

impl Task for Install {
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        info!("Installing git-crypt...");
        let init = require("init_task_name", self.init_task_name.as_ref())?;
        let add_users = require("add_users_task_name", self.add_users_task_name.as_ref())?;

        ctx.invoke(init, args)?;
        maybe_invoke(ctx, self.provision_secrets_task_name.as_ref(), args)?;
        ctx.invoke(add_users, args)?;
        maybe_commit(
            ctx,
            self.commit_task_name.as_ref(),
            &self.commit_message_template,
            Fields::new(),
            args,
        )
    }
}
