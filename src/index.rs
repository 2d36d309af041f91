//! The staging index: a flat path→blob-id map, persisted as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Flat staging map. Backed by a `BTreeMap` so iteration and JSON
/// serialization are always in sorted key order, making assertions on the
/// persisted file reliable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, String>,
}

impl Index {
    pub fn new() -> Self {
        Index::default()
    }

    /// Loads the index from `path`. An absent or unparseable file yields an
    /// empty index rather than an error — index corruption is tolerated on
    /// read per the malformed-index recovery policy.
    pub fn load(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Index::new();
        };
        match serde_json::from_str(&text) {
            Ok(entries) => Index { entries },
            Err(_) => Index::new(),
        }
    }

    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn insert(&mut self, path: impl Into<String>, blob_id: impl Into<String>) {
        self.entries.insert(path.into(), blob_id.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_yields_empty_index() {
        let dir = tempdir().unwrap();
        let idx = Index::load(&dir.path().join("index"));
        assert!(idx.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_and_sorts_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index");
        let mut idx = Index::new();
        idx.insert("z.txt", "a".repeat(40));
        idx.insert("a.txt", "b".repeat(40));
        idx.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let a_pos = raw.find("a.txt").unwrap();
        let z_pos = raw.find("z.txt").unwrap();
        assert!(a_pos < z_pos, "keys must serialize in sorted order");

        let reloaded = Index::load(&path);
        assert_eq!(reloaded, idx);
    }

    #[test]
    fn unparseable_file_yields_empty_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index");
        fs::write(&path, "not json").unwrap();
        assert!(Index::load(&path).is_empty());
    }
}
