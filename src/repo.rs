//! Repository discovery, `.git` layout creation, and default identity.

use crate::error::{Error, Result};
use crate::refs::Refs;
use crate::store::Store;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTHOR: &str = "PyGit user <user@pygit.com>";
pub const DEFAULT_BRANCH: &str = "master";
const METADATA_DIR: &str = ".git";

pub struct Repository {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

impl Repository {
    /// Opens the repository rooted exactly at `root`, failing if `.git`
    /// is not present there.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let git_dir = root.join(METADATA_DIR);
        if !git_dir.is_dir() {
            return Err(Error::NotARepository(root.display().to_string()));
        }
        Ok(Repository { root, git_dir })
    }

    /// Creates a fresh repository layout at `root`. Fails soft: if `.git`
    /// already exists, returns `Ok(false)` and changes nothing.
    pub fn init(root: impl Into<PathBuf>) -> Result<bool> {
        let root = root.into();
        let git_dir = root.join(METADATA_DIR);
        if git_dir.exists() {
            return Ok(false);
        }
        fs::create_dir_all(&git_dir)?;
        fs::create_dir_all(git_dir.join("objects"))?;
        fs::create_dir_all(git_dir.join("refs").join("heads"))?;
        fs::write(
            git_dir.join("HEAD"),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;
        fs::write(git_dir.join("index"), "{}")?;
        Ok(true)
    }

    pub fn store(&self) -> Store {
        Store::new(self.git_dir.join("objects"))
    }

    pub fn refs(&self) -> Refs {
        Refs::new(self.git_dir.clone())
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    /// True if `path`'s components include the metadata directory name —
    /// used to skip `.git` during working-tree traversal.
    pub fn is_metadata_path(path: &Path) -> bool {
        path.components()
            .any(|c| c.as_os_str() == METADATA_DIR)
    }
}
