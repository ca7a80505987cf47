//! Template lookup by name fragment.
//! Fragments are matched against paths relative to the template root, so the
//! root's own location never causes a match.

use crate::error::Result;
use crate::walker::walk;
use clap::ValueEnum;
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// How a fragment is compared with a template's relative path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicy {
    /// The relative path contains the fragment anywhere. `test1` matches both
    /// `test1` and `a_directory/test1`, and also `test10`.
    #[default]
    Substring,
    /// The file name equals the fragment exactly.
    FileName,
}

impl MatchPolicy {
    pub fn matches(&self, relative: &Path, fragment: &str) -> bool {
        match self {
            MatchPolicy::Substring => relative.to_string_lossy().contains(fragment),
            MatchPolicy::FileName => {
                relative.file_name().map(|name| name == fragment).unwrap_or(false)
            }
        }
    }
}

/// Finds the templates under `root` matching any of `fragments`.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - `root`-joined paths, each at most once, sorted
///
/// # Errors
/// * Any error from [`walk`], unchanged. Nothing is returned on error.
pub fn find_by_name<P, S>(root: P, fragments: &[S], policy: MatchPolicy) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    let mut found = BTreeSet::new();

    for relative in walk(root)? {
        for fragment in fragments {
            let fragment = fragment.as_ref();
            if policy.matches(&relative, fragment) {
                debug!("Fragment '{}' matches '{}'", fragment, relative.display());
                found.insert(root.join(&relative));
            }
        }
    }

    Ok(found.into_iter().collect())
}
