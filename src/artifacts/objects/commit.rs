//! Commit object
//!
//! A commit is an immutable snapshot of every tracked file. It contains:
//! - At most one parent commit ID (history is a tree, not a DAG)
//! - A timestamp with its UTC offset
//! - The blobs of all tracked files, keyed by file name
//! - The commit message
//!
//! ## Format
//!
//! On disk (before compression):
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <unix-seconds> <timezone>
//! blob <size> <name>
//! <content>
//!
//! <commit message>
//! ```
//!
//! The root commit of every repository is built by [`Commit::root`] from fixed
//! values, so all repositories share the same root commit id.

use crate::artifacts::objects::blob::{BLOB_TAG, Blob};
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame, read_frame};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::{BufRead, Cursor, Read, Write};

pub const COMMIT_TAG: &str = "commit";

/// Message of the commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "LIT_COMMIT_DATE";

const READABLE_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Snapshot of tracked files keyed by file name
pub type Snapshot = BTreeMap<String, Blob>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (None for the root commit)
    parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    /// Tracked files at this commit
    blobs: Snapshot,
    message: String,
}

impl Commit {
    pub fn new(
        parent: ObjectId,
        timestamp: DateTime<FixedOffset>,
        blobs: Snapshot,
        message: String,
    ) -> Self {
        Commit {
            parent: Some(parent),
            timestamp,
            blobs,
            message,
        }
    }

    /// The commit every repository starts from
    pub fn root() -> Self {
        Commit {
            parent: None,
            timestamp: DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            blobs: Snapshot::new(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
        }
    }

    /// Timestamp for a new commit: `LIT_COMMIT_DATE` if set, otherwise now
    ///
    /// The variable accepts RFC 2822 dates or `%Y-%m-%d %H:%M:%S %z`.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn blobs(&self) -> &Snapshot {
        &self.blobs
    }

    pub fn blob(&self, name: &str) -> Option<&Blob> {
        self.blobs.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    /// Format the timestamp like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(READABLE_DATE_FORMAT).to_string()
    }

    fn parse_date(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(value, "%s %z")
            .with_context(|| format!("Invalid commit object: bad date {value}"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        if let Some(parent) = &self.parent {
            writeln!(content_bytes, "parent {}", parent)?;
        }
        writeln!(
            content_bytes,
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )?;
        for blob in self.blobs.values() {
            content_bytes.write_all(&blob.serialize()?)?;
        }
        writeln!(content_bytes)?;
        content_bytes.write_all(self.message.as_bytes())?;

        frame(self.kind(), &content_bytes)
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        read_frame(&mut reader, COMMIT_TAG)?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        let mut reader = Cursor::new(content);

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .context("Invalid commit object: missing date line")?;

        let parent = match line.strip_prefix("parent ") {
            Some(parent_oid) => {
                let parent = ObjectId::try_parse(parent_oid.trim_end().to_string())?;
                line.clear();
                reader
                    .read_line(&mut line)
                    .context("Invalid commit object: missing date line")?;
                Some(parent)
            }
            None => None,
        };

        let timestamp = line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")
            .and_then(|date| Self::parse_date(date.trim_end()))?;

        let mut blobs = Snapshot::new();
        while reader.fill_buf()?.starts_with(format!("{BLOB_TAG} ").as_bytes()) {
            let blob = Blob::deserialize(&mut reader)?;
            blobs.insert(blob.name().to_string(), blob);
        }

        // skip the empty line separating the snapshot from the message
        line.clear();
        reader.read_line(&mut line)?;
        if line != "\n" {
            anyhow::bail!("Invalid commit object: missing message separator");
        }

        let mut message = String::new();
        reader.read_to_string(&mut message)?;

        Ok(Commit {
            parent,
            timestamp,
            blobs,
            message,
        })
    }
}

impl Object for Commit {
    fn kind(&self) -> &'static str {
        COMMIT_TAG
    }
}
