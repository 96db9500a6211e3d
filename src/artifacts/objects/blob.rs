//! Blob record
//!
//! A blob is the content of one working-directory file captured at stage
//! time, together with the file's name relative to the repository root.
//! Blobs are not stored on their own; each commit embeds its blobs.
//!
//! ## Format
//!
//! Inside a commit: `blob <content-size> <name>\n<content>\n`

use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

pub const BLOB_TAG: &str = "blob";

/// Captured content of a working-directory file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Path relative to the repository root
    name: String,
    /// File content, byte for byte
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether this blob captures exactly `content`
    pub fn has_content(&self, content: &[u8]) -> bool {
        self.content == content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut blob_bytes = Vec::new();
        let header = format!("{} {} {}\n", BLOB_TAG, self.content.len(), self.name);
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&self.content)?;
        blob_bytes.write_all(b"\n")?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut header = String::new();
        reader.read_line(&mut header)?;

        let header = header
            .strip_suffix('\n')
            .and_then(|header| header.strip_prefix(BLOB_TAG))
            .and_then(|header| header.strip_prefix(' '))
            .context("Invalid blob record: malformed header")?;
        let (size, name) = header
            .split_once(' ')
            .context("Invalid blob record: missing name")?;
        let size = size
            .parse::<usize>()
            .context("Invalid blob record: bad content size")?;

        // the record is terminated by a newline after the content
        let mut content = vec![0; size + 1];
        reader
            .read_exact(&mut content)
            .context("Invalid blob record: truncated content")?;
        if content.pop() != Some(b'\n') {
            anyhow::bail!("Invalid blob record: missing terminator");
        }

        Ok(Self::new(name.to_string(), content))
    }
}
