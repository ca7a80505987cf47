//! Git plumbing for template repositories: clone, discovery and pull.

use crate::constants::{DEFAULT_REMOTE, GIT_DIR};
use crate::error::{Error, Result};
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, StatusOptions};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of a successful pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Updated,
    UpToDate,
}

/// What an update batch did to each repository it found.
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub updated: Vec<PathBuf>,
    pub up_to_date: Vec<PathBuf>,
    /// Repositories left alone because of a conflict.
    pub skipped: Vec<PathBuf>,
}

/// Fetch options authenticating SSH remotes with the user's default key.
fn fetch_options() -> FetchOptions<'static> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        if !allowed_types.contains(CredentialType::SSH_KEY) {
            return Cred::default();
        }
        let home = std::env::var_os("HOME")
            .ok_or_else(|| git2::Error::from_str("HOME is not set, cannot locate an ssh key"))?;
        Cred::ssh_key(
            username_from_url.unwrap_or("git"),
            None,
            &Path::new(&home).join(".ssh").join("id_rsa"),
            None,
        )
    });

    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(callbacks);
    fetch_opts
}

/// Clones `url` into `destination`.
///
/// # Returns
/// * `Result<bool>` - false when `destination` already holds a repository and
///   nothing was cloned
pub fn clone_into(url: &str, destination: &Path) -> Result<bool> {
    if destination.exists() && git2::Repository::open(destination).is_ok() {
        info!(
            "Repository '{}' already exists at '{}', not cloning.",
            url,
            destination.display()
        );
        return Ok(false);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!("Cloning '{}' to '{}'.", url, destination.display());
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options());
    builder.clone(url, destination)?;
    Ok(true)
}

/// Finds every repository beneath `root`: the parents of `.git` directories.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Repository working directories, sorted
pub fn find_repositories<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut repositories = Vec::new();
    let mut entries = WalkDir::new(root).into_iter();

    while let Some(entry) = entries.next() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if entry.file_type().is_dir() && entry.file_name() == GIT_DIR {
            if let Some(parent) = entry.path().parent() {
                repositories.push(parent.to_path_buf());
            }
            entries.skip_current_dir();
        }
    }

    repositories.sort();
    Ok(repositories)
}

/// Whether the working tree has uncommitted changes, untracked files included.
pub fn is_dirty(repo: &git2::Repository) -> Result<bool> {
    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);
    Ok(!repo.statuses(Some(&mut options))?.is_empty())
}

fn conflict(path: &Path, reason: &str) -> Error {
    Error::RepositoryConflict {
        repository: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Pulls the current branch of the repository at `path` from `origin`.
///
/// Only fast-forwards are applied.
///
/// # Errors
/// * `Error::RepositoryConflict` if the tree is dirty, HEAD is detached or the
///   branch has diverged from its upstream
/// * `Error::Git2Error` for any other git failure
pub fn pull(path: &Path) -> Result<PullOutcome> {
    let repo = git2::Repository::open(path)?;
    if is_dirty(&repo)? {
        return Err(conflict(path, "uncommitted local changes, not pulling"));
    }

    let head = repo.head()?;
    if !head.is_branch() {
        return Err(conflict(path, "HEAD is detached, not pulling"));
    }
    let refname = head.name().ok_or_else(|| conflict(path, "branch name is not UTF-8"))?;
    let branch = head.shorthand().ok_or_else(|| conflict(path, "branch name is not UTF-8"))?;

    let mut remote = repo.find_remote(DEFAULT_REMOTE)?;
    remote.fetch(&[branch], Some(&mut fetch_options()), None)?;

    let fetch_head = repo.find_reference("FETCH_HEAD")?;
    let fetch_commit = repo.reference_to_annotated_commit(&fetch_head)?;
    let (analysis, _) = repo.merge_analysis(&[&fetch_commit])?;

    if analysis.is_up_to_date() {
        return Ok(PullOutcome::UpToDate);
    }
    if !analysis.is_fast_forward() {
        return Err(conflict(path, "local branch has diverged from its upstream"));
    }

    let mut reference = repo.find_reference(refname)?;
    reference.set_target(fetch_commit.id(), &format!("pull: fast-forward {branch}"))?;
    repo.set_head(refname)?;
    repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
    Ok(PullOutcome::Updated)
}

/// Pulls every repository beneath `root`, one after the other.
///
/// Conflicts are logged and the repository skipped; they recur on later
/// updates until cleaned up by hand. Any other failure stops the batch, leaving
/// repositories already pulled as they are.
pub fn update_all<P: AsRef<Path>>(root: P) -> Result<UpdateReport> {
    let mut report = UpdateReport::default();

    for repository in find_repositories(root)? {
        match pull(&repository) {
            Ok(PullOutcome::Updated) => {
                info!("Updated '{}'.", repository.display());
                report.updated.push(repository);
            }
            Ok(PullOutcome::UpToDate) => {
                info!("'{}' is already up to date.", repository.display());
                report.up_to_date.push(repository);
            }
            Err(e) if e.is_recoverable() => {
                warn!("{e}");
                warn!(
                    "Repeated updates will report success, but '{}' needs manual clean up.",
                    repository.display()
                );
                report.skipped.push(repository);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
