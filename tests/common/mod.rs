#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};

/// Creates `files` (relative paths, `/`-separated) under `root` with their own
/// path as content. Entries ending in `/` become empty directories.
pub fn create_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if file.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
            continue;
        }
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, file).unwrap();
    }
}

pub fn write_file(path: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// Writes `name` in the repository's working tree and commits it on HEAD.
pub fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    write_file(&workdir.join(name), content);

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::now("templ", "templ@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents).unwrap()
}

/// A repository at `path` with one committed template.
pub fn init_upstream(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();
    commit_file(&repo, "hello.txt", "Hello {{ .name }}\n", "initial commit");
    repo
}

pub fn head_id(path: &Path) -> Oid {
    Repository::open(path).unwrap().head().unwrap().target().unwrap()
}
