//! Repository object types
//!
//! The object store holds a single kind of object, the commit. A commit embeds
//! every blob it tracks, so blobs never exist on disk on their own:
//!
//! - **Blob**: a file name plus the text captured when the file was staged
//! - **Commit**: message, timestamp, optional parent and the blob snapshot
//!
//! Objects are serialized as `<kind> <size>\0<content>` and identified by the
//! SHA-1 of that serialization.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix printed when abbreviating an object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
