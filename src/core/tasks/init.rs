use std::rc::Rc;

use tracing::info;

use super::{Operation, Tools};
use crate::core::git_crypt::GitCrypt;
use crate::core::registry::{Context, Task};
use crate::error::Result;

/// Initialise git-crypt in the repository.
pub struct Init {
    pub key_name: Option<String>,
    git_crypt: Rc<dyn GitCrypt>,
}

impl Init {
    pub fn new(tools: &Tools) -> Self {
        Self {
            key_name: None,
            git_crypt: Rc::clone(&tools.git_crypt),
        }
    }
}

impl Operation for Init {
    const DEFAULT_NAME: &'static str = "init";
    const DESCRIPTION: &'static str = "Initialise git-crypt.";
}

impl Task for Init {
    fn run(&self, _ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        info!("Initialising git-crypt...");
        self.git_crypt.init(self.key_name.as_deref())
    }
}
