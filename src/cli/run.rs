//! Run command.
//!
//! Resolves a task name from the root scope and invokes it.

use tracing::debug;

use crate::cli::output;
use crate::core::name::{Scope, TaskName};
use crate::core::registry::Registry;
use crate::error::Result;

/// Invoke `task` with `args`.
pub fn execute(registry: &Registry, task: &str, args: &[String]) -> Result<()> {
    let name = TaskName::parse(task)?;
    debug!(task = %name, ?args, "running task");

    registry.invoke(&name, &Scope::root(), args)?;
    output::success(&output::task(task));
    Ok(())
}
