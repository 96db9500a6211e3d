//! Local, single-user version control
//!
//! Content-addressed snapshots, a staging index, named branches and a
//! three-way merge over a linear-parent commit tree.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
