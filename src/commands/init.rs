//! `init` — create a fresh repository in the current directory.

use crate::error::Result;
use crate::repo::Repository;
use std::path::Path;

/// Returns `true` if a new repository was created, `false` if one already
/// existed (fails soft, per spec).
pub fn run(root: &Path) -> Result<bool> {
    Repository::init(root)
}
