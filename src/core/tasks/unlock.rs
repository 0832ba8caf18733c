use std::path::PathBuf;
use std::rc::Rc;

use tracing::info;

use super::{Operation, Tools};
use crate::core::git_crypt::GitCrypt;
use crate::core::registry::{Context, Task};
use crate::error::Result;

/// Unlock the repository, with symmetric key files or via GPG when none
/// are given.
pub struct Unlock {
    pub key_paths: Option<Vec<PathBuf>>,
    git_crypt: Rc<dyn GitCrypt>,
}

impl Unlock {
    pub fn new(tools: &Tools) -> Self {
        Self {
            key_paths: None,
            git_crypt: Rc::clone(&tools.git_crypt),
        }
    }
}

impl Operation for Unlock {
    const DEFAULT_NAME: &'static str = "unlock";
    const DESCRIPTION: &'static str = "Unlock git-crypt.";
}

impl Task for Unlock {
    fn run(&self, _ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        info!("Unlocking git-crypt...");
        self.git_crypt.unlock(self.key_paths.as_deref())
    }
}
