//! Tree objects: ordered directory listings of `(mode, name, child-id)`.

use crate::error::{Error, Result};
use crate::object::ObjectKind;
use crate::store::Store;

pub const MODE_FILE: &str = "100644";
pub const MODE_DIR: &str = "40000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: String,
    pub name: String,
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Tree { entries: Vec::new() }
    }

    /// Inserts an entry, keeping the entry set sorted and unique by name —
    /// the only source of hash determinism for trees.
    pub fn add_entry(&mut self, mode: impl Into<String>, name: impl Into<String>, id: impl Into<String>) {
        self.entries.push(TreeEntry {
            mode: mode.into(),
            name: name.into(),
            id: id.into(),
        });
        self.entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for entry in &self.entries {
            let id_bytes = hex::decode(&entry.id)
                .map_err(|e| Error::MalformedIndex(format!("bad object id {}: {e}", entry.id)))?;
            out.extend_from_slice(entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.name.as_bytes());
            out.push(0);
            out.extend_from_slice(&id_bytes);
        }
        Ok(out)
    }

    pub fn parse(payload: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut cursor = payload;
        while !cursor.is_empty() {
            let nul = cursor
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| Error::ObjectCorrupt(String::new(), "tree entry missing nul".into()))?;
            let header = std::str::from_utf8(&cursor[..nul])
                .map_err(|e| Error::ObjectCorrupt(String::new(), format!("tree entry not utf-8: {e}")))?;
            let (mode, name) = header
                .split_once(' ')
                .ok_or_else(|| Error::ObjectCorrupt(String::new(), "tree entry missing mode separator".into()))?;
            let rest = &cursor[nul + 1..];
            if rest.len() < 20 {
                return Err(Error::ObjectCorrupt(String::new(), "tree entry truncated id".into()));
            }
            let id = hex::encode(&rest[..20]);
            entries.push(TreeEntry {
                mode: mode.to_string(),
                name: name.to_string(),
                id,
            });
            cursor = &rest[20..];
        }
        Ok(Tree { entries })
    }

    pub fn store(&self, store: &Store) -> Result<String> {
        let payload = self.serialize()?;
        store.write(ObjectKind::Tree, &payload)
    }

    pub fn load(store: &Store, id: &str) -> Result<Self> {
        let payload = store.read_payload(id, ObjectKind::Tree)?;
        Self::parse(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_then_parse_preserves_entries_and_order() {
        let mut tree = Tree::new();
        tree.add_entry(MODE_FILE, "b.txt", "b".repeat(40));
        tree.add_entry(MODE_FILE, "a.txt", "a".repeat(40));
        tree.add_entry(MODE_DIR, "src", "c".repeat(40));

        let payload = tree.serialize().unwrap();
        let parsed = Tree::parse(&payload).unwrap();

        assert_eq!(parsed.entries.len(), 3);
        assert_eq!(parsed.entries[0].name, "a.txt");
        assert_eq!(parsed.entries[1].name, "b.txt");
        assert_eq!(parsed.entries[2].name, "src");
        assert_eq!(parsed, tree);
    }

    #[test]
    fn entries_sort_byte_lexicographically_not_locale_aware() {
        let mut tree = Tree::new();
        tree.add_entry(MODE_FILE, "src", "1".repeat(40));
        tree.add_entry(MODE_FILE, "readme", "2".repeat(40));
        assert_eq!(tree.entries[0].name, "readme");
        assert_eq!(tree.entries[1].name, "src");
    }
}
