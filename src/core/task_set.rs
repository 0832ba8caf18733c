//! The standard git-crypt task set.
//!
//! Defines every operation task under one namespace, wiring the composite
//! tasks to their collaborators by name. Two sets under different
//! namespaces are fully independent.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::core::constants::messages;
use crate::core::name::{self, deserialize_optional, Scope, TaskName};
use crate::core::registry::Registry;
use crate::core::tasks::{
    self, AddUser, AddUsers, Binding, Init, Install, Lock, Reinstall, Tools, Uninstall, Unlock,
};
use crate::error::Result;

/// Options for the standard task set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub namespace: Option<String>,

    pub key_name: Option<String>,

    pub gpg_home_directory: Option<PathBuf>,
    pub gpg_work_directory: PathBuf,

    pub gpg_user_ids: Vec<String>,
    pub gpg_user_key_paths: Vec<PathBuf>,

    pub allow_git_crypt_commit: bool,
    pub allow_untrusted_keys: bool,

    pub lock_when_unclean: bool,
    pub lock_all_keys: bool,

    pub unlock_key_paths: Option<Vec<PathBuf>>,

    pub install_commit_message_template: String,
    #[serde(deserialize_with = "deserialize_optional")]
    pub install_commit_task_name: Option<TaskName>,

    pub uninstall_commit_message_template: String,
    #[serde(deserialize_with = "deserialize_optional")]
    pub uninstall_commit_task_name: Option<TaskName>,

    pub add_users_commit_message_template: String,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_users_commit_task_name: Option<TaskName>,

    pub add_user_by_id_commit_message_template: String,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_user_by_id_commit_task_name: Option<TaskName>,

    pub add_user_by_key_path_commit_message_template: String,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_user_by_key_path_commit_task_name: Option<TaskName>,

    #[serde(deserialize_with = "deserialize_optional")]
    pub provision_secrets_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub destroy_secrets_task_name: Option<TaskName>,

    #[serde(deserialize_with = "deserialize_optional")]
    pub init_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub lock_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub unlock_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub install_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub uninstall_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub reinstall_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_users_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_user_by_id_task_name: Option<TaskName>,
    #[serde(deserialize_with = "deserialize_optional")]
    pub add_user_by_key_path_task_name: Option<TaskName>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: None,
            key_name: None,
            gpg_home_directory: None,
            gpg_work_directory: std::env::temp_dir(),
            gpg_user_ids: Vec::new(),
            gpg_user_key_paths: Vec::new(),
            allow_git_crypt_commit: false,
            allow_untrusted_keys: false,
            lock_when_unclean: false,
            lock_all_keys: false,
            unlock_key_paths: None,
            install_commit_message_template: messages::INSTALL.to_string(),
            install_commit_task_name: None,
            uninstall_commit_message_template: messages::UNINSTALL.to_string(),
            uninstall_commit_task_name: None,
            add_users_commit_message_template: messages::ADD_USERS.to_string(),
            add_users_commit_task_name: None,
            add_user_by_id_commit_message_template: messages::ADD_USER.to_string(),
            add_user_by_id_commit_task_name: None,
            add_user_by_key_path_commit_message_template: messages::ADD_USER.to_string(),
            add_user_by_key_path_commit_task_name: None,
            provision_secrets_task_name: None,
            destroy_secrets_task_name: None,
            init_task_name: Some(name::literal("init")),
            lock_task_name: Some(name::literal("lock")),
            unlock_task_name: Some(name::literal("unlock")),
            install_task_name: Some(name::literal("install")),
            uninstall_task_name: Some(name::literal("uninstall")),
            reinstall_task_name: Some(name::literal("reinstall")),
            add_users_task_name: Some(name::literal("add_users")),
            add_user_by_id_task_name: Some(name::literal("add_user_by_id")),
            add_user_by_key_path_task_name: Some(name::literal("add_user_by_key_path")),
        }
    }
}

impl Options {
    /// The namespace the set is defined in.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidName` for a malformed namespace.
    pub fn scope(&self) -> Result<Scope> {
        Ok(Scope::parse(self.namespace.as_deref().unwrap_or_default())?)
    }
}

/// The standard task set.
pub struct Standard;

impl Standard {
    /// Define all git-crypt tasks described by `options` in `registry`.
    ///
    /// A task whose own name option is unset is defined under its default
    /// name, and collaborators referring to it through that option see it
    /// as unset.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::AlreadyDefined` if a name collides with an
    /// existing task.
    pub fn define(registry: &mut Registry, options: &Options, tools: &Tools) -> Result<()> {
        let scope = options.scope()?;
        debug!(namespace = %scope, "defining git-crypt task set");

        let mut init = Init::new(tools);
        init.key_name = options.key_name.clone();
        tasks::define(registry, &scope, options.init_task_name.as_ref(), init)?;

        let mut lock = Lock::new(tools);
        lock.key_name = options.key_name.clone();
        lock.force = options.lock_when_unclean;
        lock.all = options.lock_all_keys;
        tasks::define(registry, &scope, options.lock_task_name.as_ref(), lock)?;

        let mut unlock = Unlock::new(tools);
        unlock.key_paths = options.unlock_key_paths.clone();
        tasks::define(registry, &scope, options.unlock_task_name.as_ref(), unlock)?;

        let install = Install {
            init_task_name: options.init_task_name.clone(),
            add_users_task_name: options.add_users_task_name.clone(),
            provision_secrets_task_name: options.provision_secrets_task_name.clone(),
            commit_task_name: options.install_commit_task_name.clone(),
            commit_message_template: options.install_commit_message_template.clone(),
        };
        tasks::define(registry, &scope, options.install_task_name.as_ref(), install)?;

        let mut uninstall = Uninstall::new(tools);
        uninstall.lock_task_name = options.lock_task_name.clone();
        uninstall.destroy_secrets_task_name = options.destroy_secrets_task_name.clone();
        uninstall.commit_task_name = options.uninstall_commit_task_name.clone();
        uninstall.commit_message_template = options.uninstall_commit_message_template.clone();
        tasks::define(registry, &scope, options.uninstall_task_name.as_ref(), uninstall)?;

        let reinstall = Reinstall {
            uninstall_task_name: options.uninstall_task_name.clone(),
            install_task_names: vec![options.install_task_name.clone()],
        };
        tasks::define(registry, &scope, options.reinstall_task_name.as_ref(), reinstall)?;

        let add_users = AddUsers {
            gpg_user_ids: options.gpg_user_ids.clone(),
            gpg_user_key_paths: options.gpg_user_key_paths.clone(),
            add_user_by_id_task_name: options.add_user_by_id_task_name.clone(),
            add_user_by_key_path_task_name: options.add_user_by_key_path_task_name.clone(),
            commit_message_template: options.add_users_commit_message_template.clone(),
            commit_task_name: options.add_users_commit_task_name.clone(),
        };
        tasks::define(registry, &scope, options.add_users_task_name.as_ref(), add_users)?;

        let mut by_id = Self::add_user(options, tools);
        by_id.binding = Binding::ById;
        by_id.commit_task_name = options.add_user_by_id_commit_task_name.clone();
        by_id.commit_message_template = options.add_user_by_id_commit_message_template.clone();
        let by_id_name = options
            .add_user_by_id_task_name
            .clone()
            .unwrap_or_else(|| name::literal("add_user_by_id"));
        tasks::define(registry, &scope, Some(&by_id_name), by_id)?;

        let mut by_key_path = Self::add_user(options, tools);
        by_key_path.binding = Binding::ByKeyPath;
        by_key_path.commit_task_name = options.add_user_by_key_path_commit_task_name.clone();
        by_key_path.commit_message_template =
            options.add_user_by_key_path_commit_message_template.clone();
        let by_key_path_name = options
            .add_user_by_key_path_task_name
            .clone()
            .unwrap_or_else(|| name::literal("add_user_by_key_path"));
        tasks::define(registry, &scope, Some(&by_key_path_name), by_key_path)?;

        Ok(())
    }

    fn add_user(options: &Options, tools: &Tools) -> AddUser {
        let mut task = AddUser::new(tools);
        task.key_name = options.key_name.clone();
        task.commit = options.allow_git_crypt_commit;
        task.allow_untrusted_keys = options.allow_untrusted_keys;
        task.gpg_home_directory = options.gpg_home_directory.clone();
        task.gpg_work_directory = options.gpg_work_directory.clone();
        task
    }
}
