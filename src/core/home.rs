//! GnuPG key-store home resolution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::Result;

/// Where keys are imported and which `GNUPGHOME` git-crypt sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyHome {
    /// The user's default key store; `GNUPGHOME` is left alone.
    Default,
    /// An explicit directory, created if missing.
    Directory(PathBuf),
    /// A fresh directory under `work_directory`, removed afterwards.
    Temporary { work_directory: PathBuf },
}

impl KeyHome {
    /// Whether the store only lives for the duration of one action.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary { .. })
    }

    /// Resolve the home directory and run `f` with it.
    ///
    /// A temporary directory stays alive until `f` returns.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created, or whatever
    /// `f` returns. A failure to remove a temporary directory is reported
    /// only when `f` succeeded.
    pub fn with_resolved_directory<T>(
        &self,
        f: impl FnOnce(Option<&Path>) -> Result<T>,
    ) -> Result<T> {
        match self {
            Self::Default => f(None),
            Self::Directory(path) => {
                std::fs::create_dir_all(path)?;
                f(Some(path))
            }
            Self::Temporary { work_directory } => {
                std::fs::create_dir_all(work_directory)?;
                let dir = tempfile::Builder::new()
                    .prefix(constants::TEMPORARY_HOME_PREFIX)
                    .tempdir_in(work_directory)?;
                debug!(home = %dir.path().display(), "created temporary key store");
                let result = f(Some(dir.path()));
                let closed = dir.close();
                let value = result?;
                closed?;
                Ok(value)
            }
        }
    }
}
