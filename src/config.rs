//! Template root resolution.
//! The template root is the single directory holding every known template and
//! every cloned template repository. It is resolved once at start-up.

use crate::constants::{DEFAULT_TEMPL_SUBDIR, TEMPL_DIR_ENV};
use crate::error::{Error, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Absolute path of the template root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRoot(PathBuf);

impl TemplateRoot {
    /// Resolves the template root from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(std::env::var_os(TEMPL_DIR_ENV), std::env::var_os("HOME"))
    }

    /// Resolves the template root from an optional `TEMPL_DIR` value and an
    /// optional home directory.
    ///
    /// # Errors
    /// * `Error::NotFound` if `TEMPL_DIR` names a directory that does not exist
    /// * `Error::TemplateRootError` if neither `TEMPL_DIR` nor `HOME` is set
    /// * `Error::IoError` if the default directory cannot be created
    pub fn resolve(templ_dir: Option<OsString>, home: Option<OsString>) -> Result<Self> {
        let root = match templ_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                debug!("Found {}={}", TEMPL_DIR_ENV, dir.display());
                // An explicit directory is expected to exist already.
                if !dir.is_dir() {
                    return Err(Error::NotFound {
                        what: "template root",
                        path: dir.display().to_string(),
                    });
                }
                dir
            }
            None => {
                let home = home.filter(|home| !home.is_empty()).ok_or_else(|| {
                    Error::TemplateRootError(format!(
                        "neither {TEMPL_DIR_ENV} nor HOME is set"
                    ))
                })?;
                let dir = PathBuf::from(home).join(DEFAULT_TEMPL_SUBDIR);
                debug!("{} not set, using default '{}'", TEMPL_DIR_ENV, dir.display());
                if !dir.exists() {
                    info!("Did not find '{}'. Creating...", dir.display());
                    create_private_dir(&dir)?;
                }
                dir
            }
        };

        Ok(Self(std::path::absolute(&root)?))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TemplateRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for TemplateRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir).map_err(Error::IoError)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(Error::IoError)
}
