//! Commit identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings. Commits are stored flat,
//! one file per commit at `.lit/objects/<id>`, and may be referred to by any
//! prefix that is unique among the stored ids.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};

/// Commit identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full-length object ID
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !Self::is_hex(&id) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `prefix` could abbreviate some object ID
    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.is_empty() && prefix.len() <= OBJECT_ID_LENGTH && Self::is_hex(prefix)
    }

    fn is_hex(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
