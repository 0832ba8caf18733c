use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info};

use super::{maybe_commit, Operation, Tools};
use crate::core::constants::{self, messages};
use crate::core::git_crypt::{AddGpgUser, Environment, GitCrypt};
use crate::core::gpg::{Gpg, Import};
use crate::core::home::KeyHome;
use crate::core::name::TaskName;
use crate::core::registry::{Context, Task};
use crate::core::template::{AddedBy, Fields};
use crate::error::{GpgError, Result, TaskError};

/// Which parameter the first invocation argument fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// Arguments are ignored.
    #[default]
    None,
    ById,
    ByKeyPath,
}

/// Add a single GPG user to git-crypt, by key id or by public key file.
///
/// A key file is imported first and the user is added by the imported
/// fingerprint. Without a configured GnuPG home the import goes into a
/// temporary key store, and keys added from it are trusted since nothing
/// else could have put them there.
pub struct AddUser {
    pub key_name: Option<String>,
    /// Let git-crypt commit the new key file itself.
    pub commit: bool,
    pub allow_untrusted_keys: bool,
    pub gpg_user_id: Option<String>,
    pub gpg_user_key_path: Option<PathBuf>,
    pub gpg_home_directory: Option<PathBuf>,
    pub gpg_work_directory: PathBuf,
    pub commit_message_template: String,
    pub commit_task_name: Option<TaskName>,
    pub binding: Binding,
    git_crypt: Rc<dyn GitCrypt>,
    gpg: Rc<dyn Gpg>,
}

/// The user to add, after arguments are applied.
enum Subject<'a> {
    Id(&'a str),
    KeyPath(&'a Path),
}

impl AddUser {
    pub fn new(tools: &Tools) -> Self {
        Self {
            key_name: None,
            commit: false,
            allow_untrusted_keys: false,
            gpg_user_id: None,
            gpg_user_key_path: None,
            gpg_home_directory: None,
            gpg_work_directory: std::env::temp_dir(),
            commit_message_template: messages::ADD_USER.to_string(),
            commit_task_name: None,
            binding: Binding::None,
            git_crypt: Rc::clone(&tools.git_crypt),
            gpg: Rc::clone(&tools.gpg),
        }
    }

    fn subject<'a>(&'a self, args: &'a [String]) -> Result<Subject<'a>> {
        let argument = args.first().map(String::as_str);
        let id = match (self.binding, argument) {
            (Binding::ById, Some(arg)) => Some(arg),
            _ => self.gpg_user_id.as_deref(),
        };
        let key_path = match (self.binding, argument) {
            (Binding::ByKeyPath, Some(arg)) => Some(Path::new(arg)),
            _ => self.gpg_user_key_path.as_deref(),
        };

        match (id, key_path) {
            (Some(id), None) => Ok(Subject::Id(id)),
            (None, Some(path)) => Ok(Subject::KeyPath(path)),
            (None, None) => Err(TaskError::RequiredParameterUnset(
                "one of gpg_user_id or gpg_user_key_path must be provided but neither was"
                    .to_string(),
            )
            .into()),
            (Some(_), Some(_)) => Err(TaskError::ConflictingParameters(
                "only one of gpg_user_id or gpg_user_key_path may be provided".to_string(),
            )
            .into()),
        }
    }

    fn add(&self, gpg_user_id: &str, trusted: bool, home: Option<&Path>) -> Result<()> {
        let mut env = Environment::new();
        if let Some(home) = home {
            env.push((constants::GNUPGHOME.to_string(), home.display().to_string()));
        }
        self.git_crypt.add_gpg_user(
            &AddGpgUser {
                gpg_user_id: gpg_user_id.to_string(),
                key_name: self.key_name.clone(),
                no_commit: !self.commit,
                trusted,
            },
            &env,
        )
    }

    fn add_by_id(&self, id: &str) -> Result<()> {
        info!("Adding GPG user with ID: '{id}' to git-crypt...");
        let home = match &self.gpg_home_directory {
            Some(dir) => KeyHome::Directory(dir.clone()),
            None => KeyHome::Default,
        };
        home.with_resolved_directory(|dir| self.add(id, self.allow_untrusted_keys, dir))
    }

    fn add_by_key_path(&self, key_path: &Path) -> Result<()> {
        info!(
            "Adding GPG user with key at: '{}' to git-crypt...",
            key_path.display()
        );
        let home = match &self.gpg_home_directory {
            Some(dir) => KeyHome::Directory(dir.clone()),
            None => KeyHome::Temporary {
                work_directory: self.gpg_work_directory.clone(),
            },
        };
        let trusted = home.is_temporary() || self.allow_untrusted_keys;

        home.with_resolved_directory(|dir| {
            let result = self.gpg.import(&Import {
                key_file_paths: vec![key_path.to_path_buf()],
                home_directory: dir.map(Path::to_path_buf),
                with_status: true,
            })?;
            let fingerprint = result
                .fingerprint()
                .ok_or_else(|| GpgError::NoImportedKey(key_path.to_path_buf()))?;
            debug!(%fingerprint, "imported key");
            self.add(fingerprint, trusted, dir)
        })
    }
}

impl Operation for AddUser {
    const DEFAULT_NAME: &'static str = "add_user";
    const DESCRIPTION: &'static str = "Add user to git-crypt.";
}

impl Task for AddUser {
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        let (added_by, value) = match self.subject(args)? {
            Subject::Id(id) => {
                self.add_by_id(id)?;
                (AddedBy::Id, id.to_string())
            }
            Subject::KeyPath(path) => {
                self.add_by_key_path(path)?;
                (AddedBy::KeyPath, path.display().to_string())
            }
        };
        info!("Done.");

        let fields = Fields::new()
            .with("type", added_by)
            .with("value", value)
            .with("key_name", self.key_name.as_deref().unwrap_or_default());
        maybe_commit(
            ctx,
            self.commit_task_name.as_ref(),
            &self.commit_message_template,
            fields,
            &[],
        )
    }
}
