//! Staging index entries
//!
//! An entry is either a blob staged for addition or the name of a file staged
//! for removal. Names and contents are written as length-prefixed byte runs so
//! the reader can pull them through the checksum reader with exact sizes.
//! Contents are raw bytes and need not be UTF-8.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::blob::Blob;
use byteorder::WriteBytesExt;
use bytes::Bytes;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    Addition(Blob),
    Removal(String),
}

impl IndexEntry {
    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut entry_bytes = Vec::new();

        match self {
            IndexEntry::Addition(blob) => {
                write_sized(&mut entry_bytes, blob.name().as_bytes())?;
                write_sized(&mut entry_bytes, blob.content())?;
            }
            IndexEntry::Removal(name) => write_sized(&mut entry_bytes, name.as_bytes())?,
        }

        Ok(Bytes::from(entry_bytes))
    }

    /// Read the blob of an addition entry
    pub(crate) fn read_addition(reader: &mut Checksum) -> anyhow::Result<Blob> {
        let name = reader.read_string()?;
        let content = reader.read_sized()?;

        Ok(Blob::new(name, content))
    }

    /// Read the file name of a removal entry
    pub(crate) fn read_removal(reader: &mut Checksum) -> anyhow::Result<String> {
        reader.read_string()
    }
}

fn write_sized(writer: &mut Vec<u8>, value: &[u8]) -> anyhow::Result<()> {
    let size = u32::try_from(value.len())
        .map_err(|_| anyhow::anyhow!("Entry too large for the staging index"))?;

    writer.write_u32::<byteorder::NetworkEndian>(size)?;
    writer.write_all(value)?;

    Ok(())
}
