use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    /// Tag written in front of the serialized content
    fn kind(&self) -> &'static str;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}

/// Prefix `content` with the `<kind> <size>\0` object header
pub(crate) fn frame(kind: &str, content: &[u8]) -> Result<Bytes> {
    let mut object_bytes = Vec::with_capacity(content.len() + kind.len() + 12);
    let header = format!("{} {}\0", kind, content.len());
    object_bytes.write_all(header.as_bytes())?;
    object_bytes.write_all(content)?;

    Ok(Bytes::from(object_bytes))
}

/// Consume the object header, checking it announces an object of `kind`
pub(crate) fn read_frame(reader: &mut impl BufRead, kind: &str) -> Result<usize> {
    let mut object_kind = Vec::new();
    reader.read_until(b' ', &mut object_kind)?;
    let object_kind = String::from_utf8(object_kind)?;

    if object_kind.trim_end() != kind {
        anyhow::bail!("Invalid object kind: expected {}, got {}", kind, object_kind);
    }

    let mut size = Vec::new();
    reader.read_until(b'\0', &mut size)?;
    let size = String::from_utf8(size)?;

    size.trim_end_matches('\0')
        .parse::<usize>()
        .context("Invalid object size in header")
}
