//! `pygit` — a minimal, local-only version-control engine modeled on the
//! Git object model: content-addressed object store, staging index,
//! tree-structured snapshots, and linear-with-branches commit history.

pub mod commands;
pub mod commit;
pub mod error;
pub mod index;
pub mod object;
pub mod refs;
pub mod repo;
pub mod store;
pub mod tree;
pub mod treebuilder;
pub mod worktree;

pub use error::{Error, Result};
pub use repo::Repository;
