//! Branch refs and the symbolic HEAD pointer.

use crate::error::Result;
use std::fs;
use std::path::PathBuf;

const HEAD_PREFIX: &str = "ref: refs/heads/";

pub struct Refs {
    git_dir: PathBuf,
}

impl Refs {
    pub fn new(git_dir: PathBuf) -> Self {
        Refs { git_dir }
    }

    fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    fn heads_dir(&self) -> PathBuf {
        self.git_dir.join("refs").join("heads")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.heads_dir().join(name)
    }

    /// Returns the branch HEAD currently names. If HEAD is not a symbolic
    /// `ref: refs/heads/<branch>` reference (not produced by this system,
    /// but tolerated on read), returns the sentinel `"HEAD"`.
    pub fn current_branch(&self) -> Result<String> {
        let content = fs::read_to_string(self.head_path())?;
        let content = content.trim();
        match content.strip_prefix(HEAD_PREFIX) {
            Some(branch) => Ok(branch.trim().to_string()),
            None => Ok("HEAD".to_string()),
        }
    }

    pub fn set_head(&self, branch: &str) -> Result<()> {
        fs::write(self.head_path(), format!("{HEAD_PREFIX}{branch}\n"))?;
        Ok(())
    }

    pub fn branch_commit(&self, name: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.branch_path(name)) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_branch(&self, name: &str, commit_id: &str) -> Result<()> {
        fs::create_dir_all(self.heads_dir())?;
        fs::write(self.branch_path(name), format!("{commit_id}\n"))?;
        Ok(())
    }

    pub fn delete_branch(&self, name: &str) -> Result<bool> {
        let path = self.branch_path(name);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).exists()
    }

    pub fn list_branches(&self) -> Result<Vec<String>> {
        let dir = self.heads_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn current_branch_reads_symbolic_head() {
        let dir = tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        fs::create_dir_all(&git_dir).unwrap();
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();
        let refs = Refs::new(git_dir);
        assert_eq!(refs.current_branch().unwrap(), "master");
    }

    #[test]
    fn set_and_read_branch_commit() {
        let dir = tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        fs::create_dir_all(&git_dir).unwrap();
        let refs = Refs::new(git_dir);
        assert_eq!(refs.branch_commit("master").unwrap(), None);
        refs.set_branch("master", &"a".repeat(40)).unwrap();
        assert_eq!(refs.branch_commit("master").unwrap(), Some("a".repeat(40)));
    }

    #[test]
    fn list_branches_is_sorted() {
        let dir = tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        fs::create_dir_all(&git_dir).unwrap();
        let refs = Refs::new(git_dir);
        refs.set_branch("zeta", &"a".repeat(40)).unwrap();
        refs.set_branch("alpha", &"b".repeat(40)).unwrap();
        assert_eq!(refs.list_branches().unwrap(), vec!["alpha", "zeta"]);
    }
}
