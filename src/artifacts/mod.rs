//! Data structures and algorithms
//!
//! - `branch`: branch name validation
//! - `checkout`: working-tree migration between snapshots
//! - `index`: staging index file format
//! - `log`: commit history traversal
//! - `merge`: split point discovery and three-way merge decisions
//! - `objects`: blobs, commits and their ids
//! - `status`: working tree status inspection

pub mod branch;
pub mod checkout;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
