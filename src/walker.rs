//! Directory walking for the template root.
//! Hidden entries (basename starting with `.`) are never reported and hidden
//! directories are not descended into.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Returns true for entries whose file name starts with a dot.
pub fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().map(|name| name.starts_with('.')).unwrap_or(false)
}

/// Lists every non-hidden file beneath `root`, including symlinks to files.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths relative to `root`, sorted lexically by
///   their byte representation so the listing is stable across platforms
///
/// # Errors
/// * `Error::NotFound` if `root` is not an existing directory
/// * `Error::IoError` if any part of the tree cannot be read
pub fn walk<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotFound { what: "directory", path: root.display().to_string() });
    }

    let mut files = Vec::new();
    // The root itself is exempt so a root such as `~/.config/templ` still walks.
    for entry in
        WalkDir::new(root).into_iter().filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        // Symlinks count when they resolve to a file; linked directories are not followed.
        let is_file =
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        let relative = entry.path().strip_prefix(root).map_err(|e| {
            Error::IoError(std::io::Error::other(format!(
                "'{}' is outside '{}': {e}",
                entry.path().display(),
                root.display()
            )))
        })?;
        files.push(relative.to_path_buf());
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    debug!("Found {} files under '{}'", files.len(), root.display());
    Ok(files)
}
