//! Object store
//!
//! Commits are persisted zlib-compressed, one file per commit, named by the
//! commit's full id. Writes go to a temporary file that is renamed into place.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Missing;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

const TEMP_OBJECT_PREFIX: &str = "tmp-obj-";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist a commit under its id, returning the id
    ///
    /// Storing a commit that already exists is a no-op.
    pub fn store(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let object_id = commit.object_id()?;
        let object_path = self.path.join(object_id.as_ref());

        if !object_path.exists() {
            self.write_object(object_path, commit.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_path = self.path.join(object_id.as_ref());
        if !object_path.is_file() {
            return Err(Missing::Commit.into());
        }

        let object_content = self.read_object(object_path)?;
        Commit::deserialize(Cursor::new(object_content))
            .with_context(|| format!("Unable to parse commit {}", object_id))
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Fails with `Missing::Commit` when no stored id, or more than one,
    /// starts with `prefix`.
    pub fn resolve(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(Missing::Commit.into());
        }

        let mut matches = self.find_objects_by_prefix(prefix)?;

        match matches.len() {
            1 => Ok(matches.remove(0)),
            _ => Err(Missing::Commit.into()),
        }
    }

    /// Find all stored ids starting with the given prefix
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .list_objects()?
            .into_iter()
            .filter(|oid| oid.starts_with(prefix))
            .collect())
    }

    /// Every stored commit id, in no particular order
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        for entry in std::fs::read_dir(&self.path).with_context(|| {
            format!("Unable to list object directory {}", self.path.display())
        })? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            // skip leftovers of interrupted writes
            if file_name.starts_with(TEMP_OBJECT_PREFIX) {
                continue;
            }

            if let Ok(oid) = ObjectId::try_parse(file_name.to_string()) {
                object_ids.push(oid);
            }
        }

        Ok(object_ids)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("{}{}", TEMP_OBJECT_PREFIX, rand::random::<u32>())
    }
}
