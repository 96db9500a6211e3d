//! Command implementations
//!
//! Every command reads the persisted repository state, computes the new state
//! and writes it back. User-facing output goes through the repository's writer.

pub mod porcelain;
