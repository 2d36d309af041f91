//! `branch` — list, create, or delete branch refs.

use crate::error::{Error, Result};
use crate::repo::Repository;

/// Lists every branch name, sorted, alongside the current branch.
pub fn list(repo: &Repository) -> Result<(String, Vec<String>)> {
    let refs = repo.refs();
    Ok((refs.current_branch()?, refs.list_branches()?))
}

/// Creates `name` at the current branch's commit. Errors if there is no
/// commit to point it at.
pub fn create(repo: &Repository, name: &str) -> Result<()> {
    let refs = repo.refs();
    let current = refs.current_branch()?;
    let commit_id = refs
        .branch_commit(&current)?
        .ok_or_else(|| Error::UnbornBranch(current.clone()))?;
    refs.set_branch(name, &commit_id)
}

/// Deletes `name`'s ref if present, returning whether it existed.
pub fn delete(repo: &Repository, name: &str) -> Result<bool> {
    repo.refs().delete_branch(name)
}
