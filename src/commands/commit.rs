//! `commit` — snapshot the index into a commit object and advance the
//! current branch.

use crate::commit::Commit;
use crate::error::{Error, Result};
use crate::index::Index;
use crate::repo::Repository;
use crate::treebuilder;
use chrono::Utc;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Created(String),
    NothingToCommit,
}

pub fn run(repo: &Repository, message: &str, author: &str) -> Result<Outcome> {
    let mut index = Index::load(&repo.index_path());
    let store = repo.store();
    let refs = repo.refs();

    let branch = refs.current_branch()?;
    let parent = refs.branch_commit(&branch)?;

    if index.is_empty() && parent.is_none() {
        return Ok(Outcome::NothingToCommit);
    }

    if message.trim().is_empty() {
        return Err(Error::MessageRequired);
    }

    let tree_id = treebuilder::build_tree(&index, &store)?;

    if let Some(parent_id) = &parent {
        let parent_commit = Commit::load(&store, parent_id)?;
        if parent_commit.tree == tree_id {
            return Ok(Outcome::NothingToCommit);
        }
    }

    let timestamp = Utc::now().timestamp();

    let commit = Commit {
        tree: tree_id,
        parents: parent.into_iter().collect(),
        author: author.to_string(),
        timestamp,
        message: message.to_string(),
    };
    let commit_id = commit.store(&store)?;
    refs.set_branch(&branch, &commit_id)?;

    index.clear();
    index.save(&repo.index_path())?;

    Ok(Outcome::Created(commit_id))
}
