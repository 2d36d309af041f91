//! Object identity, framing, and on-disk compression.
//!
//! Every object (blob, tree, commit) is identified by the SHA-1 hash of its
//! *storage image*: the ASCII header `"<kind> <len>\0"` followed by the raw
//! payload bytes. The on-disk image additionally zlib-deflates the storage
//! image. Both directions are implemented here; object kinds build their
//! typed payloads on top (see `tree.rs`, `commit.rs`).

use crate::error::{Error, Result};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }

    pub fn parse(kind: &str) -> Result<Self> {
        match kind {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(Error::ObjectCorrupt(
                String::new(),
                format!("unknown object kind: {other}"),
            )),
        }
    }

    /// Recognized tree entry modes map to an object kind. Readers accept
    /// both `40000` and `040000` for directories.
    pub fn from_mode(mode: &str) -> Result<Self> {
        let normalized = mode.trim_start_matches('0');
        match normalized {
            "40000" => Ok(ObjectKind::Tree),
            _ => Ok(ObjectKind::Blob),
        }
    }
}

/// A writer that hashes every byte passed through it while forwarding it to
/// an inner writer. Used to compute the SHA-1 identity while simultaneously
/// streaming the zlib-compressed bytes to disk.
pub struct HashWriter<W> {
    inner: W,
    hasher: Sha1,
}

impl<W: Write> HashWriter<W> {
    pub fn new(inner: W) -> Self {
        HashWriter {
            inner,
            hasher: Sha1::new(),
        }
    }
}

impl<W: Write> Write for HashWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Computes the identity hash and the zlib-compressed on-disk image for a
/// `(kind, payload)` pair, writing the encoded bytes to `writer` as it goes.
pub fn encode_to<W: Write>(kind: ObjectKind, payload: &[u8], writer: W) -> Result<String> {
    let encoder = ZlibEncoder::new(writer, Compression::default());
    let mut hash_writer = HashWriter::new(encoder);
    write!(hash_writer, "{} {}\0", kind.as_str(), payload.len())?;
    hash_writer.write_all(payload)?;
    hash_writer.inner.finish()?;
    let hash = hash_writer.hasher.finalize();
    Ok(hex::encode(hash))
}

/// Like `encode_to`, but streams the payload in from `reader` instead of
/// requiring it already be in memory. `size` must be the exact byte count
/// `reader` will yield, since it is written into the header before any
/// payload bytes are copied.
pub fn encode_stream_to<R: Read, W: Write>(
    kind: ObjectKind,
    reader: &mut R,
    size: u64,
    writer: W,
) -> Result<String> {
    let encoder = ZlibEncoder::new(writer, Compression::default());
    let mut hash_writer = HashWriter::new(encoder);
    write!(hash_writer, "{} {}\0", kind.as_str(), size)?;
    std::io::copy(reader, &mut hash_writer)?;
    hash_writer.inner.finish()?;
    let hash = hash_writer.hasher.finalize();
    Ok(hex::encode(hash))
}

/// Computes the identity hash and the zlib-compressed on-disk image for a
/// `(kind, payload)` pair entirely in memory.
pub fn encode(kind: ObjectKind, payload: &[u8]) -> Result<(String, Vec<u8>)> {
    let mut buf = Vec::new();
    let id = encode_to(kind, payload, &mut buf)?;
    Ok((id, buf))
}

/// Computes the identity hash of `(kind, payload)` without compressing or
/// storing it — used by `status` to compare working-tree content against
/// the index without writing new objects.
pub fn hash(kind: ObjectKind, payload: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{} {}\0", kind.as_str(), payload.len()).as_bytes());
    hasher.update(payload);
    hex::encode(hasher.finalize())
}

/// Inflates an on-disk object image and splits it into `(kind, payload)`.
pub fn decode(bytes: &[u8]) -> Result<(ObjectKind, Vec<u8>)> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut storage = Vec::new();
    decoder
        .read_to_end(&mut storage)
        .map_err(|e| Error::ObjectCorrupt(String::new(), format!("inflate failed: {e}")))?;
    let nul = storage
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::ObjectCorrupt(String::new(), "missing header terminator".into()))?;
    let header = std::str::from_utf8(&storage[..nul])
        .map_err(|e| Error::ObjectCorrupt(String::new(), format!("header not utf-8: {e}")))?;
    let (kind, _len) = header
        .split_once(' ')
        .ok_or_else(|| Error::ObjectCorrupt(String::new(), "malformed header".into()))?;
    let kind = ObjectKind::parse(kind)?;
    let payload = storage[nul + 1..].to_vec();
    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_hash_matches_known_value() {
        let (id, _) = encode(ObjectKind::Blob, b"hi\n").unwrap();
        assert_eq!(id, "32f95c3cf70b7aa19ca88912c84d0cbf7d9e62ae");
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let payload = b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904";
        let (_, encoded) = encode(ObjectKind::Commit, payload).unwrap();
        let (kind, decoded_payload) = decode(&encoded).unwrap();
        assert_eq!(kind, ObjectKind::Commit);
        assert_eq!(decoded_payload, payload);
    }

    #[test]
    fn hash_matches_encode_identity() {
        let (id, _) = encode(ObjectKind::Blob, b"hi\n").unwrap();
        assert_eq!(hash(ObjectKind::Blob, b"hi\n"), id);
    }

    #[test]
    fn from_mode_accepts_both_tree_spellings() {
        assert_eq!(ObjectKind::from_mode("40000").unwrap(), ObjectKind::Tree);
        assert_eq!(ObjectKind::from_mode("040000").unwrap(), ObjectKind::Tree);
        assert_eq!(ObjectKind::from_mode("100644").unwrap(), ObjectKind::Blob);
    }
}
