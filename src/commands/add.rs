//! `add` — stage a file or every file under a directory.

use crate::error::{Error, Result};
use crate::index::Index;
use crate::repo::Repository;
use crate::store::Store;
use ignore::WalkBuilder;
use std::path::Path;

pub fn run(repo: &Repository, paths: &[impl AsRef<Path>]) -> Result<()> {
    let mut index = Index::load(&repo.index_path());
    let store = repo.store();

    for path in paths {
        add_path(repo, &store, &mut index, path.as_ref())?;
    }

    index.save(&repo.index_path())
}

fn add_path(repo: &Repository, store: &Store, index: &mut Index, path: &Path) -> Result<()> {
    if Repository::is_metadata_path(path) {
        return Err(Error::PathNotFound(path.display().to_string()));
    }
    let full = repo.root.join(path);
    if full.is_file() {
        stage_file(repo, store, index, &full)
    } else if full.is_dir() {
        add_directory(repo, store, index, &full)
    } else if full.exists() {
        Err(Error::InvalidPathKind(path.display().to_string()))
    } else {
        Err(Error::PathNotFound(path.display().to_string()))
    }
}

fn add_directory(repo: &Repository, store: &Store, index: &mut Index, dir: &Path) -> Result<()> {
    let walker = WalkBuilder::new(dir)
        .hidden(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .ignore(false)
        .parents(false)
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        let rel_to_root = entry.path().strip_prefix(&repo.root).unwrap_or(entry.path());
        if Repository::is_metadata_path(rel_to_root) {
            continue;
        }
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            stage_file(repo, store, index, entry.path())?;
        }
    }
    Ok(())
}

fn stage_file(repo: &Repository, store: &Store, index: &mut Index, full: &Path) -> Result<()> {
    let blob_id = store.write_blob_file(full)?;
    let rel = full
        .strip_prefix(&repo.root)
        .unwrap_or(full)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    index.insert(rel, blob_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn adds_single_file() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        fs::write(dir.path().join("hello.txt"), "hi\n").unwrap();

        run(&repo, &["hello.txt"]).unwrap();

        let index = Index::load(&repo.index_path());
        assert_eq!(
            index.get("hello.txt"),
            Some("32f95c3cf70b7aa19ca88912c84d0cbf7d9e62ae")
        );
    }

    #[test]
    fn adds_directory_recursively() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.txt"), "A").unwrap();
        fs::write(dir.path().join("src/b.txt"), "B").unwrap();

        run(&repo, &["src"]).unwrap();

        let index = Index::load(&repo.index_path());
        assert!(index.get("src/a.txt").is_some());
        assert!(index.get("src/b.txt").is_some());
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        let err = run(&repo, &["nope.txt"]).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn explicit_metadata_path_is_rejected() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        let err = run(&repo, &[".git/HEAD"]).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
        let index = Index::load(&repo.index_path());
        assert!(index.is_empty());
    }

    #[test]
    fn reapplying_add_on_unchanged_file_is_idempotent() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        fs::write(dir.path().join("hello.txt"), "hi\n").unwrap();

        run(&repo, &["hello.txt"]).unwrap();
        let first = Index::load(&repo.index_path());
        run(&repo, &["hello.txt"]).unwrap();
        let second = Index::load(&repo.index_path());
        assert_eq!(first, second);
    }
}
