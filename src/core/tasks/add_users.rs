use std::path::PathBuf;

use tracing::{debug, info};

use super::{maybe_commit, Operation};
use crate::core::constants::messages;
use crate::core::key_paths;
use crate::core::name::{self, TaskName};
use crate::core::registry::{require, Context, Task};
use crate::core::template::Fields;
use crate::error::{Result, TaskError};

/// Add every configured user by delegating to the single-user tasks.
///
/// Key paths are handled first, each directory expanded into the files
/// beneath it, then ids. Both collaborators are checked before anything
/// is added.
pub struct AddUsers {
    pub gpg_user_ids: Vec<String>,
    pub gpg_user_key_paths: Vec<PathBuf>,
    pub add_user_by_id_task_name: Option<TaskName>,
    pub add_user_by_key_path_task_name: Option<TaskName>,
    pub commit_message_template: String,
    pub commit_task_name: Option<TaskName>,
}

impl Default for AddUsers {
    fn default() -> Self {
        Self {
            gpg_user_ids: Vec::new(),
            gpg_user_key_paths: Vec::new(),
            add_user_by_id_task_name: Some(name::literal("add_user_by_id")),
            add_user_by_key_path_task_name: Some(name::literal("add_user_by_key_path")),
            commit_message_template: messages::ADD_USERS.to_string(),
            commit_task_name: None,
        }
    }
}

impl AddUsers {
    /// Resolve a collaborator name for a non-empty list of users.
    fn collaborator<'a>(
        ctx: &Context<'_>,
        parameter: &str,
        name: Option<&'a TaskName>,
        needed: bool,
    ) -> Result<Option<&'a TaskName>> {
        if !needed {
            return Ok(None);
        }
        let name = require(parameter, name)?;
        ctx.ensure_exists(name)?;
        Ok(Some(name))
    }
}

impl Operation for AddUsers {
    const DEFAULT_NAME: &'static str = "add_users";
    const DESCRIPTION: &'static str = "Add users to git-crypt.";
}

impl Task for AddUsers {
    fn run(&self, ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        info!("Adding users to git-crypt...");

        if self.gpg_user_ids.is_empty() && self.gpg_user_key_paths.is_empty() {
            return Err(TaskError::RequiredParameterUnset(
                "one of gpg_user_ids or gpg_user_key_paths must be provided but neither was"
                    .to_string(),
            )
            .into());
        }

        let by_key_path = Self::collaborator(
            ctx,
            "add_user_by_key_path_task_name",
            self.add_user_by_key_path_task_name.as_ref(),
            !self.gpg_user_key_paths.is_empty(),
        )?;
        let by_id = Self::collaborator(
            ctx,
            "add_user_by_id_task_name",
            self.add_user_by_id_task_name.as_ref(),
            !self.gpg_user_ids.is_empty(),
        )?;

        if let Some(task) = by_key_path {
            let key_paths = key_paths::expand(&self.gpg_user_key_paths)?;
            debug!(count = key_paths.len(), "resolved key paths");
            for key_path in key_paths {
                ctx.invoke(task, &[key_path.display().to_string()])?;
            }
        }

        if let Some(task) = by_id {
            for id in &self.gpg_user_ids {
                ctx.invoke(task, std::slice::from_ref(id))?;
            }
        }

        let key_paths: Vec<String> = self
            .gpg_user_key_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let fields = Fields::new()
            .with("gpg_user_ids", self.gpg_user_ids.join(", "))
            .with("gpg_user_key_paths", key_paths.join(", "));
        maybe_commit(
            ctx,
            self.commit_task_name.as_ref(),
            &self.commit_message_template,
            fields,
            &[],
        )
    }
}
