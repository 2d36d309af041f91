//! The content-addressed object store: `.git/objects/<xx>/<38-hex>`.

use crate::error::{Error, Result};
use crate::object::{self, ObjectKind};
use std::fs::{File, create_dir_all};
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct Store {
    objects_dir: PathBuf,
}

impl Store {
    pub fn new(objects_dir: PathBuf) -> Self {
        Store { objects_dir }
    }

    fn object_path(&self, id: &str) -> PathBuf {
        self.objects_dir.join(&id[..2]).join(&id[2..])
    }

    /// Writes `(kind, payload)` to the store. A no-op if the object already
    /// exists (objects are write-once and deduplicate by content).
    pub fn write(&self, kind: ObjectKind, payload: &[u8]) -> Result<String> {
        let (id, encoded) = object::encode(kind, payload)?;
        let path = self.object_path(&id);
        if path.exists() {
            return Ok(id);
        }
        let dir = path.parent().expect("object path always has a parent");
        create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        use std::io::Write;
        tmp.write_all(&encoded)?;
        tmp.persist(&path)
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
        Ok(id)
    }

    /// Streams a blob in from the file at `path` without buffering its whole
    /// contents, hashing and compressing as it copies. A no-op if an object
    /// with the resulting id already exists.
    pub fn write_blob_file(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();
        create_dir_all(&self.objects_dir)?;
        let mut tmp = NamedTempFile::new_in(&self.objects_dir)?;
        let id = object::encode_stream_to(ObjectKind::Blob, &mut file, size, &mut tmp)?;
        let final_path = self.object_path(&id);
        if final_path.exists() {
            return Ok(id);
        }
        let dir = final_path
            .parent()
            .expect("object path always has a parent");
        create_dir_all(dir)?;
        tmp.persist(&final_path)
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
        Ok(id)
    }

    pub fn read(&self, id: &str) -> Result<(ObjectKind, Vec<u8>)> {
        if id.len() < 4 {
            return Err(Error::ObjectMissing(id.to_string()));
        }
        let path = self.object_path(id);
        let mut file = File::open(&path).map_err(|_| Error::ObjectMissing(id.to_string()))?;
        let mut encoded = Vec::new();
        file.read_to_end(&mut encoded)?;
        object::decode(&encoded).map_err(|e| match e {
            Error::ObjectCorrupt(_, msg) => Error::ObjectCorrupt(id.to_string(), msg),
            other => other,
        })
    }

    pub fn read_payload(&self, id: &str, expected: ObjectKind) -> Result<Vec<u8>> {
        let (kind, payload) = self.read(id)?;
        if kind != expected {
            return Err(Error::ObjectCorrupt(
                id.to_string(),
                format!("expected {} object, found {}", expected.as_str(), kind.as_str()),
            ));
        }
        Ok(payload)
    }
}
