//! Staging index
//!
//! The staging index holds the changes the next commit will apply on top of
//! HEAD's snapshot:
//!
//! - `additions`: blobs to insert or overwrite, keyed by file name
//! - `removals`: names of tracked files to drop
//!
//! A name is never staged for addition and removal at the same time. The
//! index is emptied after every successful commit.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.lit/index`)
    path: Box<Path>,
    additions: BTreeMap<String, Blob>,
    removals: BTreeSet<String>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn additions(&self) -> &BTreeMap<String, Blob> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn addition(&self, name: &str) -> Option<&Blob> {
        self.additions.get(name)
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn is_clean(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Stage `blob` for addition, replacing any earlier entry for its name
    pub fn add(&mut self, blob: Blob) {
        self.removals.remove(blob.name());
        self.additions.insert(blob.name().to_string(), blob);
        self.changed = true;
    }

    /// Stage `name` for removal, dropping any pending addition
    pub fn remove(&mut self, name: &str) {
        self.additions.remove(name);
        self.removals.insert(name.to_string());
        self.changed = true;
    }

    /// Forget any pending addition or removal of `name`
    ///
    /// Returns whether there was something to forget.
    pub fn discard(&mut self, name: &str) -> bool {
        let discarded = self.additions.remove(name).is_some() | self.removals.remove(name);
        self.changed |= discarded;

        discarded
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_clean();
        self.additions.clear();
        self.removals.clear();
    }

    /// Snapshot of the next commit: `base` with additions upserted and
    /// removals dropped
    pub fn apply_to(&self, base: &Snapshot) -> Snapshot {
        let mut snapshot = base.clone();

        for (name, blob) in &self.additions {
            snapshot.insert(name.clone(), blob.clone());
        }
        for name in &self.removals {
            snapshot.remove(name);
        }

        snapshot
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(&header_bytes)?;

        for _ in 0..header.additions_count {
            let blob = IndexEntry::read_addition(&mut reader)?;
            self.additions.insert(blob.name().to_string(), blob);
        }
        for _ in 0..header.removals_count {
            self.removals.insert(IndexEntry::read_removal(&mut reader)?);
        }

        reader.verify()
    }

    /// Write the index back to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader {
            additions_count: self.additions.len() as u32,
            removals_count: self.removals.len() as u32,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    /// Additions followed by removals, each sorted by name
    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.additions
            .values()
            .cloned()
            .map(IndexEntry::Addition)
            .chain(self.removals.iter().cloned().map(IndexEntry::Removal))
    }
}
