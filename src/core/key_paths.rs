//! Key path expansion.
//!
//! A configured key path may name a single key file or a directory of
//! them. Directories are walked depth-first with entries in sorted order so
//! users are always added in the same sequence.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Expand each path into the key files it denotes.
///
/// Paths that are not directories are passed through untouched, even if
/// they do not exist; the import step reports those.
///
/// # Errors
///
/// Returns an I/O error if a directory cannot be read.
pub fn expand<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        collect(path.as_ref(), &mut files)?;
    }
    Ok(files)
}

fn collect(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !path.is_dir() {
        files.push(path.to_path_buf());
        return Ok(());
    }

    let mut entries = std::fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for entry in entries {
        collect(&entry, files)?;
    }
    Ok(())
}
