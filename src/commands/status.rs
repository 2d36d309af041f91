//! `status` — compare index, HEAD tree, and working tree.
//!
//! The index is cleared on every commit (spec'd, not a bug — see
//! `commit`), so a path can be "tracked" without carrying an index entry:
//! its last known hash lives in the HEAD commit's tree instead. `not-staged`
//! and `deleted` therefore compare against the index entry when present and
//! fall back to the HEAD tree entry otherwise, so a committed-then-edited or
//! committed-then-deleted file is still reported without requiring a
//! re-`add`.

use crate::commit::Commit;
use crate::error::Result;
use crate::object::{self, ObjectKind};
use crate::repo::Repository;
use crate::worktree;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedChange {
    New,
    Modified,
}

pub struct Report {
    pub to_be_committed: Vec<(String, StagedChange)>,
    pub not_staged: Vec<String>,
    pub untracked: Vec<String>,
    pub deleted: Vec<String>,
}

pub fn run(repo: &Repository) -> Result<Report> {
    let store = repo.store();
    let refs = repo.refs();
    let branch = refs.current_branch()?;

    let index = crate::index::Index::load(&repo.index_path());

    let head_tree_index: BTreeMap<String, String> = match refs.branch_commit(&branch)? {
        Some(id) => {
            let commit = Commit::load(&store, &id)?;
            worktree::flatten_tree(&store, &commit.tree)?
        }
        None => BTreeMap::new(),
    };

    let working_paths = worktree::enumerate_files(&repo.root)?;
    let mut working: BTreeMap<String, String> = BTreeMap::new();
    for path in &working_paths {
        let bytes = fs::read(repo.root.join(path))?;
        working.insert(path.clone(), object::hash(ObjectKind::Blob, &bytes));
    }

    let mut to_be_committed = Vec::new();
    for (path, blob_id) in index.as_map() {
        match head_tree_index.get(path) {
            Some(head_id) if head_id == blob_id => {}
            Some(_) => to_be_committed.push((path.clone(), StagedChange::Modified)),
            None => to_be_committed.push((path.clone(), StagedChange::New)),
        }
    }

    let tracked_hash = |path: &str| -> Option<String> {
        index
            .get(path)
            .map(str::to_string)
            .or_else(|| head_tree_index.get(path).cloned())
    };

    let mut not_staged = Vec::new();
    let mut untracked = Vec::new();
    for (path, working_id) in &working {
        match tracked_hash(path) {
            Some(tracked_id) => {
                if tracked_id != *working_id {
                    not_staged.push(path.clone());
                }
            }
            None => untracked.push(path.clone()),
        }
    }

    let tracked_paths = index
        .as_map()
        .keys()
        .chain(head_tree_index.keys())
        .cloned()
        .collect::<std::collections::BTreeSet<_>>();
    let mut deleted = Vec::new();
    for path in tracked_paths {
        if !working.contains_key(&path) {
            deleted.push(path);
        }
    }

    Ok(Report {
        to_be_committed,
        not_staged,
        untracked,
        deleted,
    })
}
