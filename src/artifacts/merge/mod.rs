//! Merge engine
//!
//! - `split_finder`: locates the split point of two branch tips
//! - `resolution`: per-file three-way decisions collected into a plan
//! - `conflict`: text written to conflicted files

pub mod conflict;
pub mod resolution;
pub mod split_finder;
