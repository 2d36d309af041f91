//! Commit objects: a root tree plus parent links, identity, and a message.

use crate::error::{Error, Result};
use crate::object::ObjectKind;
use crate::store::Store;
use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub tree: String,
    pub parents: Vec<String>,
    pub author: String,
    pub timestamp: i64,
    pub message: String,
}

impl Commit {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = String::new();
        writeln!(out, "tree {}", self.tree).unwrap();
        for parent in &self.parents {
            writeln!(out, "parent {}", parent).unwrap();
        }
        writeln!(out, "author {} {} +0000", self.author, self.timestamp).unwrap();
        writeln!(out, "committer {} {} +0000", self.author, self.timestamp).unwrap();
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    /// Parses a commit payload. Author-line parsing splits on single
    /// spaces and takes the penultimate token as the timestamp, discarding
    /// the trailing timezone token — identities containing the literal
    /// sequence `" <digits> +0000"` at the end would be misparsed. This
    /// limitation is preserved rather than hardened.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| Error::ObjectCorrupt(String::new(), format!("commit not utf-8: {e}")))?;
        let mut lines = text.split('\n');
        let mut tree = None;
        let mut parents = Vec::new();
        let mut author_line = None;

        for line in &mut lines {
            if line.is_empty() {
                break;
            }
            if let Some(rest) = line.strip_prefix("tree ") {
                tree = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("parent ") {
                parents.push(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("author ") {
                author_line = Some(rest.to_string());
            } else if line.strip_prefix("committer ").is_some() {
                // committer carries the same identity in this model; ignored on parse.
            } else {
                return Err(Error::ObjectCorrupt(
                    String::new(),
                    format!("unrecognized commit header line: {line}"),
                ));
            }
        }

        let tree = tree.ok_or_else(|| {
            Error::ObjectCorrupt(String::new(), "commit missing tree header".into())
        })?;
        let author_line = author_line.ok_or_else(|| {
            Error::ObjectCorrupt(String::new(), "commit missing author header".into())
        })?;
        let (author, timestamp) = parse_author_line(&author_line)?;

        let message = lines.collect::<Vec<_>>().join("\n");

        Ok(Commit {
            tree,
            parents,
            author,
            timestamp,
            message,
        })
    }

    pub fn store(&self, store: &Store) -> Result<String> {
        store.write(ObjectKind::Commit, &self.serialize())
    }

    pub fn load(store: &Store, id: &str) -> Result<Self> {
        let payload = store.read_payload(id, ObjectKind::Commit)?;
        Self::parse(&payload)
    }
}

fn parse_author_line(line: &str) -> Result<(String, i64)> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() < 3 {
        return Err(Error::ObjectCorrupt(
            String::new(),
            format!("malformed author line: {line}"),
        ));
    }
    let timestamp_token = tokens[tokens.len() - 2];
    let timestamp = timestamp_token.parse::<i64>().map_err(|e| {
        Error::ObjectCorrupt(String::new(), format!("bad author timestamp: {e}"))
    })?;
    let identity = tokens[..tokens.len() - 2].join(" ");
    Ok((identity, timestamp))
}
