//! `log` — walk the first-parent chain from the current branch.

use crate::commit::Commit;
use crate::error::Result;
use crate::repo::Repository;

pub struct Entry {
    pub id: String,
    pub author: String,
    pub timestamp: i64,
    pub message: String,
}

pub fn run(repo: &Repository, max: usize) -> Result<Vec<Entry>> {
    let store = repo.store();
    let refs = repo.refs();
    let branch = refs.current_branch()?;

    let mut current = refs.branch_commit(&branch)?;
    let mut out = Vec::new();

    while let Some(id) = current {
        if out.len() >= max {
            break;
        }
        let commit = Commit::load(&store, &id)?;
        let parent = commit.parents.first().cloned();
        out.push(Entry {
            id,
            author: commit.author,
            timestamp: commit.timestamp,
            message: commit.message,
        });
        current = parent;
    }

    Ok(out)
}
