//! `checkout` — switch branches and restore the working tree to match.
//!
//! Destructive: any uncommitted edits to tracked files are discarded with
//! no safety check. This is documented, intended behavior — see spec.

use crate::commit::Commit;
use crate::error::{Error, Result};
use crate::index::Index;
use crate::repo::Repository;
use crate::worktree;
use std::collections::HashSet;

pub fn run(repo: &Repository, branch: &str, create: bool) -> Result<()> {
    let store = repo.store();
    let refs = repo.refs();

    let previous_branch = refs.current_branch()?;
    let previous_commit = if previous_branch == "HEAD" {
        None
    } else {
        refs.branch_commit(&previous_branch)?
    };

    let files_to_clear: HashSet<String> = match &previous_commit {
        Some(id) => {
            let commit = Commit::load(&store, id)?;
            worktree::flatten_tree(&store, &commit.tree)?
                .into_keys()
                .collect()
        }
        None => HashSet::new(),
    };

    if !refs.branch_exists(branch) {
        if create {
            match &previous_commit {
                Some(id) => refs.set_branch(branch, id)?,
                None => return Err(Error::UnbornBranch(branch.to_string())),
            }
        } else {
            return Err(Error::BranchNotFound(branch.to_string()));
        }
    }

    refs.set_head(branch)?;
    worktree::clear_files(&repo.root, &files_to_clear)?;

    if let Some(id) = refs.branch_commit(branch)? {
        let commit = Commit::load(&store, &id)?;
        worktree::restore_tree(&store, &commit.tree, &repo.root)?;
    }

    let mut index = Index::load(&repo.index_path());
    index.clear();
    index.save(&repo.index_path())?;

    Ok(())
}
