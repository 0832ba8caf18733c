use std::rc::Rc;

use tracing::{info, warn};

use super::{Operation, Tools};
use crate::core::git_crypt::GitCrypt;
use crate::core::registry::{Context, Task};
use crate::error::{Error, GitCryptError, Result};

/// Lock the repository.
///
/// git-crypt exits non-zero when the repository is already locked; that is
/// logged and treated as success. Failures to run git-crypt at all still
/// propagate.
pub struct Lock {
    pub key_name: Option<String>,
    /// Lock even if the working tree is unclean.
    pub force: bool,
    /// Lock every key, not just the default one.
    pub all: bool,
    git_crypt: Rc<dyn GitCrypt>,
}

impl Lock {
    pub fn new(tools: &Tools) -> Self {
        Self {
            key_name: None,
            force: false,
            all: false,
            git_crypt: Rc::clone(&tools.git_crypt),
        }
    }
}

impl Operation for Lock {
    const DEFAULT_NAME: &'static str = "lock";
    const DESCRIPTION: &'static str = "Lock git-crypt.";
}

impl Task for Lock {
    fn run(&self, _ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        info!("Locking git-crypt...");
        match self
            .git_crypt
            .lock(self.key_name.as_deref(), self.force, self.all)
        {
            Err(Error::GitCrypt(GitCryptError::CommandFailed { stderr, .. })) => {
                warn!(%stderr, "git-crypt lock failed, assuming already locked");
                Ok(())
            }
            other => other,
        }
    }
}
