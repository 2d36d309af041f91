//! Converts the flat staging index into a hierarchy of tree objects.

use crate::error::{Error, Result};
use crate::index::Index;
use crate::store::Store;
use crate::tree::{MODE_DIR, MODE_FILE, Tree};
use std::collections::BTreeMap;

#[derive(Default)]
struct Group {
    leaf_id: Option<String>,
    children: Vec<(String, String)>,
}

/// Builds and stores the root tree for `index`, returning its object id.
/// An empty index still produces and stores an empty tree.
pub fn build_tree(index: &Index, store: &Store) -> Result<String> {
    let entries: Vec<(String, String)> = index
        .iter()
        .map(|(path, id)| (path.to_string(), id.to_string()))
        .collect();
    build_level(&entries, store)
}

fn build_level(entries: &[(String, String)], store: &Store) -> Result<String> {
    let mut groups: BTreeMap<String, Group> = BTreeMap::new();

    for (path, id) in entries {
        match path.split_once('/') {
            Some((first, rest)) => {
                groups
                    .entry(first.to_string())
                    .or_default()
                    .children
                    .push((rest.to_string(), id.clone()));
            }
            None => {
                groups.entry(path.clone()).or_default().leaf_id = Some(id.clone());
            }
        }
    }

    let mut tree = Tree::new();
    for (name, group) in groups {
        let is_leaf = group.leaf_id.is_some();
        let has_children = !group.children.is_empty();
        if is_leaf && has_children {
            return Err(Error::MalformedIndex(format!(
                "'{name}' is staged as both a file and a directory"
            )));
        }
        if let Some(blob_id) = group.leaf_id {
            tree.add_entry(MODE_FILE, name, blob_id);
        } else {
            let subtree_id = build_level(&group.children, store)?;
            tree.add_entry(MODE_DIR, name, subtree_id);
        }
    }
    tree.store(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> Store {
        Store::new(dir.join("objects"))
    }

    #[test]
    fn empty_index_builds_and_stores_empty_tree() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let index = Index::new();
        let id = build_tree(&index, &store).unwrap();
        let tree = Tree::load(&store, &id).unwrap();
        assert!(tree.entries.is_empty());
    }

    #[test]
    fn nested_paths_group_into_subtrees_in_sorted_order() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let mut index = Index::new();
        index.insert("readme", "r".repeat(40));
        index.insert("src/a.txt", "a".repeat(40));
        index.insert("src/b.txt", "b".repeat(40));

        let id = build_tree(&index, &store).unwrap();
        let root = Tree::load(&store, &id).unwrap();
        assert_eq!(root.entries[0].name, "readme");
        assert_eq!(root.entries[1].name, "src");

        let src_tree = Tree::load(&store, &root.entries[1].id).unwrap();
        assert_eq!(src_tree.entries[0].name, "a.txt");
        assert_eq!(src_tree.entries[1].name, "b.txt");
    }

    #[test]
    fn same_path_as_file_and_directory_is_malformed() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let mut index = Index::new();
        index.insert("thing", "a".repeat(40));
        index.insert("thing/inner.txt", "b".repeat(40));

        let err = build_tree(&index, &store).unwrap_err();
        assert!(matches!(err, Error::MalformedIndex(_)));
    }

    #[test]
    fn build_is_deterministic_across_runs() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let mut index = Index::new();
        index.insert("b", "2".repeat(40));
        index.insert("a", "1".repeat(40));

        let id1 = build_tree(&index, &store).unwrap();
        let id2 = build_tree(&index, &store).unwrap();
        assert_eq!(id1, id2);
    }
}
