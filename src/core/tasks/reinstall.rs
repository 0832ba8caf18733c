use tracing::info;

use super::Operation;
use crate::core::name::{self, TaskName};
use crate::core::registry::{require, Context, Task};
use crate::error::Result;

/// Uninstall, then run each install task in order.
///
/// Every collaborator is resolved before any of them runs. An unset entry
/// in `install_task_names` fails that check like an unset uninstall name.
pub struct Reinstall {
    pub uninstall_task_name: Option<TaskName>,
    pub install_task_names: Vec<Option<TaskName>>,
}

impl Default for Reinstall {
    fn default() -> Self {
        Self {
            uninstall_task_name: Some(name::literal("uninstall")),
            install_task_names: vec![Some(name::literal("install"))],
        }
    }
}

impl Operation for Reinstall {
    const DEFAULT_NAME: &'static str = "reinstall";
    const DESCRIPTION: &'static str = "Reinstall git-crypt.";
}

impl Task for Reinstall {
    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        info!("Reinstalling git-crypt...");
        let uninstall = require("uninstall_task_name", self.uninstall_task_name.as_ref())?;
        let installs = self
            .install_task_names
            .iter()
            .map(|name| require("install_task_name", name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        for name in std::iter::once(uninstall).chain(installs.iter().copied()) {
            ctx.ensure_exists(name)?;
        }

        ctx.invoke(uninstall, args)?;
        for install in installs {
            ctx.invoke(install, args)?;
        }
        Ok(())
    }
}
