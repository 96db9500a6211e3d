//! Staging index file format
//!
//! The staging index records the additions and removals that the next commit
//! will apply on top of HEAD's snapshot.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "LIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Addition count (4 bytes)
//!   - Removal count (4 bytes)
//!
//! Additions (variable length, sorted by name):
//!   - Name length (4 bytes), name
//!   - Content length (4 bytes), content
//!
//! Removals (variable length, sorted by name):
//!   - Name length (4 bytes), name
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "LIDX";

/// Index file format version
pub const VERSION: u32 = 1;
