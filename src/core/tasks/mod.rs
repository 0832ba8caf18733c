//! git-crypt operation tasks.
//!
//! Each operation is a [`Task`] with public configuration fields. The
//! composite operations (install, uninstall, reinstall, add users) hold the
//! names of their collaborators rather than the collaborators themselves
//! and resolve them through the [`Context`] when they run.

use std::path::PathBuf;
use std::rc::Rc;

use crate::core::git_crypt::{GitCrypt, GitCryptCli};
use crate::core::gpg::{Gpg, GpgCli};
use crate::core::name::{Scope, TaskName};
use crate::core::registry::{Context, Registry, Task};
use crate::core::template::{self, Fields};
use crate::error::Result;

mod add_user;
mod add_users;
mod init;
mod install;
mod lock;
mod reinstall;
mod uninstall;
mod unlock;

#[cfg(test)]
pub(crate) mod fakes;

pub use add_user::{AddUser, Binding};
pub use add_users::AddUsers;
pub use init::Init;
pub use install::Install;
pub use lock::Lock;
pub use reinstall::Reinstall;
pub use uninstall::Uninstall;
pub use unlock::Unlock;

/// External collaborators shared by the operation tasks.
#[derive(Clone)]
pub struct Tools {
    pub git_crypt: Rc<dyn GitCrypt>,
    pub gpg: Rc<dyn Gpg>,
    /// Repository root; git-crypt state directories live under it.
    pub repository: PathBuf,
}

impl Tools {
    /// Tools backed by the real `git-crypt` and `gpg` binaries.
    pub fn cli(git_crypt: &str, gpg: &str, repository: impl Into<PathBuf>) -> Self {
        let repository = repository.into();
        Self {
            git_crypt: Rc::new(GitCryptCli::new(git_crypt, repository.clone())),
            gpg: Rc::new(GpgCli::new(gpg)),
            repository,
        }
    }
}

/// A task with a conventional name and description.
pub trait Operation: Task + 'static {
    const DEFAULT_NAME: &'static str;
    const DESCRIPTION: &'static str;
}

/// Define `task` in `scope`, under `name` or the operation's default name.
///
/// Returns the name the task was defined under.
pub fn define<T: Operation>(
    registry: &mut Registry,
    scope: &Scope,
    name: Option<&TaskName>,
    task: T,
) -> Result<TaskName> {
    let name = match name {
        Some(name) => name.clone(),
        None => TaskName::parse(T::DEFAULT_NAME)?,
    };
    registry.define(scope, &name, T::DESCRIPTION, task)?;
    Ok(name)
}

/// Invoke an optional collaborator when its name is set.
fn maybe_invoke(ctx: &Context<'_>, name: Option<&TaskName>, args: &[String]) -> Result<()> {
    match name {
        Some(name) => ctx.invoke(name, args),
        None => Ok(()),
    }
}

/// Invoke the commit collaborator, if set, with the rendered message
/// prepended to `args`.
fn maybe_commit(
    ctx: &Context<'_>,
    commit_task_name: Option<&TaskName>,
    template: &str,
    fields: Fields,
    args: &[String],
) -> Result<()> {
    let Some(name) = commit_task_name else {
        return Ok(());
    };
    ctx.ensure_exists(name)?;

    let message = template::render(template, &fields.with("task", ctx.name()))?;
    let commit_args: Vec<String> = std::iter::once(message)
        .chain(args.iter().cloned())
        .collect();
    ctx.invoke(name, &commit_args)
}
