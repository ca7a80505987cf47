//! Template repositories: where template sources come from and where they
//! land under the template root.
//!
//! An upstream is classified once, when a [`RepositorySource`] is built:
//! recognised remote URLs first, then existing local directories.

pub mod git;
pub mod remote;

use crate::constants::LOCAL_REPOSITORIES_DIR;
use crate::error::{Error, Result};
use log::debug;
use remote::parse_remote;
use std::fs;
use std::path::{Path, PathBuf};

pub use git::{find_repositories, update_all, PullOutcome, UpdateReport};

/// Behaviour shared by every kind of template repository.
pub trait Repository {
    /// Clones the upstream into the destination. Succeeds without cloning when
    /// the destination already holds a repository.
    fn fetch(&self) -> Result<()>;

    /// The upstream the repository was created with.
    fn origin(&self) -> &str;

    /// Where the repository lives under the template root.
    fn destination(&self) -> &Path;
}

/// A repository cloned from a directory on this machine.
#[derive(Debug, Clone)]
pub struct LocalSource {
    upstream: String,
    canonical: PathBuf,
    destination: PathBuf,
}

impl LocalSource {
    /// Wraps an existing directory; its clone goes to `<root>/local/<basename>`.
    ///
    /// # Errors
    /// * `Error::RepositoryClassificationError` if `upstream` is not a directory
    pub fn new<P: AsRef<Path>>(upstream: &str, root: P) -> Result<Self> {
        let invalid = |reason: &str| Error::RepositoryClassificationError {
            upstream: upstream.to_string(),
            reason: reason.to_string(),
        };

        if upstream.is_empty() {
            return Err(invalid("empty upstream"));
        }
        let canonical = fs::canonicalize(upstream)
            .map_err(|_| invalid("not a recognised git URL or an existing directory"))?;
        if !canonical.is_dir() {
            return Err(invalid("not a directory"));
        }
        let basename = canonical.file_name().ok_or_else(|| invalid("directory has no name"))?;
        let destination = root.as_ref().join(LOCAL_REPOSITORIES_DIR).join(basename);

        Ok(Self { upstream: upstream.to_string(), canonical, destination })
    }
}

impl Repository for LocalSource {
    fn fetch(&self) -> Result<()> {
        let url = self.canonical.to_string_lossy();
        git::clone_into(&url, &self.destination).map(|_| ())
    }

    fn origin(&self) -> &str {
        &self.upstream
    }

    fn destination(&self) -> &Path {
        &self.destination
    }
}

/// A repository cloned from a git hosting service.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    upstream: String,
    destination: PathBuf,
}

impl RemoteSource {
    /// Wraps a recognised remote URL; its clone goes to
    /// `<root>/<host-tag>/<owner>/<repo>`.
    ///
    /// # Errors
    /// * `Error::RepositoryClassificationError` if no remote pattern matches
    pub fn new<P: AsRef<Path>>(upstream: &str, root: P) -> Result<Self> {
        let location =
            parse_remote(upstream).ok_or_else(|| Error::RepositoryClassificationError {
                upstream: upstream.to_string(),
                reason: "not a recognised git URL".to_string(),
            })?;
        let destination = root.as_ref().join(location.relative_destination());
        Ok(Self { upstream: upstream.to_string(), destination })
    }
}

impl Repository for RemoteSource {
    fn fetch(&self) -> Result<()> {
        git::clone_into(&self.upstream, &self.destination).map(|_| ())
    }

    fn origin(&self) -> &str {
        &self.upstream
    }

    fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Every supported upstream kind.
#[derive(Debug, Clone)]
pub enum RepositorySource {
    Local(LocalSource),
    Remote(RemoteSource),
}

impl RepositorySource {
    /// Classifies `upstream`: a recognised remote URL, otherwise an existing
    /// local directory.
    ///
    /// # Errors
    /// * `Error::RepositoryClassificationError` if it is neither
    pub fn new<P: AsRef<Path>>(upstream: &str, root: P) -> Result<Self> {
        if parse_remote(upstream).is_some() {
            return RemoteSource::new(upstream, root).map(Self::Remote);
        }
        debug!("'{}' is not a remote URL, trying a local directory.", upstream);
        LocalSource::new(upstream, root).map(Self::Local)
    }

    fn inner(&self) -> &dyn Repository {
        match self {
            RepositorySource::Local(source) => source,
            RepositorySource::Remote(source) => source,
        }
    }
}

impl Repository for RepositorySource {
    fn fetch(&self) -> Result<()> {
        self.inner().fetch()
    }

    fn origin(&self) -> &str {
        self.inner().origin()
    }

    fn destination(&self) -> &Path {
        self.inner().destination()
    }
}

impl std::fmt::Display for RepositorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositorySource::Local(source) => {
                write!(f, "local path: '{}'", source.origin())
            }
            RepositorySource::Remote(source) => {
                write!(f, "git repository: '{}'", source.origin())
            }
        }
    }
}
