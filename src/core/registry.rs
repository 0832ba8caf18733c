//! Task registry, name resolution and invocation.
//!
//! The registry owns every defined task. Tasks reach their collaborators
//! through a [`Context`], which carries the registry and the scope of the
//! running task, so a collaborator name like `add_users` resolves relative
//! to the namespace the caller was defined in.
//!
//! Tasks have no one-shot gating: invoking the same task twice in one run
//! executes its action twice.

use std::collections::HashMap;

use tracing::debug;

use crate::core::name::{Scope, TaskName};
use crate::error::{Result, TaskError};

/// A runnable unit of work.
pub trait Task {
    /// Run the task's action with positional invocation arguments.
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()>;
}

impl<F> Task for F
where
    F: Fn(&Context<'_>, &[String]) -> Result<()>,
{
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        self(ctx, args)
    }
}

/// A task as stored in the registry.
pub struct Definition {
    name: String,
    description: String,
    scope: Scope,
    action: Box<dyn Task>,
}

impl Definition {
    /// Fully-qualified name, e.g. `git_crypt:install`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The namespace the task lives in; collaborators resolve from here.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// The set of defined tasks.
#[derive(Default)]
pub struct Registry {
    tasks: Vec<Definition>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a task named `name` inside `scope`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::AlreadyDefined` if the fully-qualified name is
    /// taken.
    pub fn define(
        &mut self,
        scope: &Scope,
        name: &TaskName,
        description: impl Into<String>,
        action: impl Task + 'static,
    ) -> Result<()> {
        let base = if name.is_absolute() {
            Scope::root()
        } else {
            scope.ancestor(name.up())
        };
        let full = name.qualified_in(&base);

        if self.index.contains_key(&full) {
            return Err(TaskError::AlreadyDefined(name.clone()).into());
        }

        let task_scope = match full.rsplit_once(':') {
            Some((namespace, _)) => Scope::parse(namespace)?,
            None => Scope::root(),
        };

        debug!(task = %full, "defining task");
        self.index.insert(full.clone(), self.tasks.len());
        self.tasks.push(Definition {
            name: full,
            description: description.into(),
            scope: task_scope,
            action: Box::new(action),
        });
        Ok(())
    }

    /// Resolve `name` as seen from `scope`.
    ///
    /// Tries the innermost enclosing namespace first and walks outwards to
    /// the root. Absolute names skip the walk.
    pub fn lookup(&self, name: &TaskName, scope: &Scope) -> Option<&Definition> {
        if name.is_absolute() {
            return self.get(&name.path());
        }

        let scope = scope.ancestor(name.up());
        let depth = scope.segments().len();
        (0..=depth)
            .map(|level| name.qualified_in(&scope.ancestor(level)))
            .find_map(|candidate| self.get(&candidate))
    }

    /// Look up a task by its fully-qualified name.
    pub fn get(&self, full_name: &str) -> Option<&Definition> {
        self.index.get(full_name).map(|&i| &self.tasks[i])
    }

    /// Resolve and run `name` from `scope`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::DependencyTaskMissing` if nothing resolves, or
    /// whatever the task's action returns.
    pub fn invoke(&self, name: &TaskName, scope: &Scope, args: &[String]) -> Result<()> {
        let task = self
            .lookup(name, scope)
            .ok_or_else(|| TaskError::DependencyTaskMissing(name.clone()))?;

        debug!(task = %task.name, args = ?args, "invoking task");
        let ctx = Context {
            registry: self,
            task,
        };
        task.action.run(&ctx, args)
    }

    /// All tasks in definition order.
    pub fn tasks(&self) -> impl Iterator<Item = &Definition> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// What a running task sees: the registry and its own definition.
pub struct Context<'a> {
    registry: &'a Registry,
    task: &'a Definition,
}

impl<'a> Context<'a> {
    /// Fully-qualified name of the running task.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    pub fn scope(&self) -> &Scope {
        self.task.scope()
    }

    /// Whether `name` resolves from the running task's scope.
    pub fn exists(&self, name: &TaskName) -> bool {
        self.registry.lookup(name, self.scope()).is_some()
    }

    /// Fail unless `name` resolves.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::DependencyTaskMissing`.
    pub fn ensure_exists(&self, name: &TaskName) -> Result<()> {
        if self.exists(name) {
            Ok(())
        } else {
            Err(TaskError::DependencyTaskMissing(name.clone()).into())
        }
    }

    /// Invoke a collaborator by name.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::DependencyTaskMissing` before any side effect if
    /// the name does not resolve.
    pub fn invoke(&self, name: &TaskName, args: &[String]) -> Result<()> {
        self.registry.invoke(name, self.scope(), args)
    }
}

/// Unwrap a mandatory collaborator name.
///
/// # Errors
///
/// Returns `TaskError::RequiredParameterUnset` naming `parameter`.
pub fn require<'n>(parameter: &str, name: Option<&'n TaskName>) -> Result<&'n TaskName> {
    name.ok_or_else(|| {
        TaskError::RequiredParameterUnset(format!("{parameter} must be provided but was not"))
            .into()
    })
}
