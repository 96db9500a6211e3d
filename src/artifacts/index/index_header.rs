use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) additions_count: u32,
    pub(crate) removals_count: u32,
}

impl IndexHeader {
    pub(crate) fn empty() -> Self {
        IndexHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            additions_count: 0,
            removals_count: 0,
        }
    }

    pub(crate) fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.additions_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removals_count)?;

        Ok(Bytes::from(bytes))
    }

    pub(crate) fn deserialize(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(anyhow!("Invalid staging index header size"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| anyhow!("Invalid marker in staging index header"))?;
        if marker != SIGNATURE {
            return Err(anyhow!("Invalid staging index signature"));
        }

        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(anyhow!("Unsupported staging index version: {}", version));
        }

        Ok(IndexHeader {
            marker,
            version,
            additions_count: byteorder::NetworkEndian::read_u32(&bytes[8..12]),
            removals_count: byteorder::NetworkEndian::read_u32(&bytes[12..16]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_foreign_signature_is_rejected() {
        let mut bytes = IndexHeader::new("DIRC".to_string(), VERSION, 0, 0)
            .serialize()
            .unwrap()
            .to_vec();
        assert!(IndexHeader::deserialize(&bytes).is_err());

        bytes[0..4].copy_from_slice(SIGNATURE.as_bytes());
        let header = IndexHeader::deserialize(&bytes).unwrap();
        assert_eq!(header, IndexHeader::empty());
    }

    #[test]
    fn header_with_newer_version_is_rejected() {
        let bytes = IndexHeader::new(SIGNATURE.to_string(), VERSION + 1, 1, 2)
            .serialize()
            .unwrap();

        assert!(IndexHeader::deserialize(&bytes).is_err());
    }
}
