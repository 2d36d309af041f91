//! Working-tree enumeration, tree restoration, and file clearing.

use crate::error::Result;
use crate::object::ObjectKind;
use crate::repo::Repository;
use crate::store::Store;
use crate::tree::Tree;
use ignore::WalkBuilder;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Depth-first enumeration of the working tree, skipping the metadata
/// directory. Returns repository-relative, forward-slash paths.
pub fn enumerate_files(root: &Path) -> Result<Vec<String>> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .ignore(false)
        .parents(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        let path = entry.path();
        if Repository::is_metadata_path(path.strip_prefix(root).unwrap_or(path)) {
            continue;
        }
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        files.push(to_repo_path(rel));
    }
    files.sort();
    Ok(files)
}

fn to_repo_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Recursively flattens a tree into a `path -> blob-id` map.
pub fn flatten_tree(store: &Store, tree_id: &str) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    flatten_into(store, tree_id, "", &mut out)?;
    Ok(out)
}

fn flatten_into(
    store: &Store,
    tree_id: &str,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<()> {
    let tree = Tree::load(store, tree_id)?;
    for entry in &tree.entries {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{prefix}/{}", entry.name)
        };
        match ObjectKind::from_mode(&entry.mode)? {
            ObjectKind::Tree => flatten_into(store, &entry.id, &path, out)?,
            _ => {
                out.insert(path, entry.id.clone());
            }
        }
    }
    Ok(())
}

/// Writes every blob reachable from `tree_id` onto disk under `dir`,
/// creating subdirectories as needed.
pub fn restore_tree(store: &Store, tree_id: &str, dir: &Path) -> Result<()> {
    let tree = Tree::load(store, tree_id)?;
    for entry in &tree.entries {
        let target = dir.join(&entry.name);
        match ObjectKind::from_mode(&entry.mode)? {
            ObjectKind::Tree => {
                fs::create_dir_all(&target)?;
                restore_tree(store, &entry.id, &target)?;
            }
            _ => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let payload = store.read_payload(&entry.id, ObjectKind::Blob)?;
                fs::write(&target, payload)?;
            }
        }
    }
    Ok(())
}

/// Deletes every path in `paths` that currently exists as a regular file.
/// Missing paths are ignored; directories are never removed.
pub fn clear_files(root: &Path, paths: &HashSet<String>) -> Result<()> {
    for path in paths {
        let full: PathBuf = root.join(path);
        if full.is_file() {
            fs::remove_file(&full)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind as OK;
    use crate::tree::{MODE_DIR, MODE_FILE};
    use tempfile::tempdir;

    #[test]
    fn restore_then_flatten_round_trips_bytes() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("objects"));
        let blob_id = store.write(OK::Blob, b"A").unwrap();
        let mut sub = crate::tree::Tree::new();
        sub.add_entry(MODE_FILE, "a.txt", blob_id.clone());
        let sub_id = sub.store(&store).unwrap();
        let mut root = crate::tree::Tree::new();
        root.add_entry(MODE_DIR, "src", sub_id);
        let root_id = root.store(&store).unwrap();

        let workdir = tempdir().unwrap();
        restore_tree(&store, &root_id, workdir.path()).unwrap();
        let content = fs::read_to_string(workdir.path().join("src/a.txt")).unwrap();
        assert_eq!(content, "A");

        let flat = flatten_tree(&store, &root_id).unwrap();
        assert_eq!(flat.get("src/a.txt"), Some(&blob_id));
    }

    #[test]
    fn clear_files_removes_only_existing_files() {
        let workdir = tempdir().unwrap();
        fs::write(workdir.path().join("a"), "x").unwrap();
        let mut paths = HashSet::new();
        paths.insert("a".to_string());
        paths.insert("missing".to_string());
        clear_files(workdir.path(), &paths).unwrap();
        assert!(!workdir.path().join("a").exists());
    }

    #[test]
    fn enumerate_skips_metadata_directory() {
        let workdir = tempdir().unwrap();
        fs::create_dir_all(workdir.path().join(".git")).unwrap();
        fs::write(workdir.path().join(".git/HEAD"), "x").unwrap();
        fs::write(workdir.path().join("tracked.txt"), "y").unwrap();
        let files = enumerate_files(workdir.path()).unwrap();
        assert_eq!(files, vec!["tracked.txt".to_string()]);
    }
}
