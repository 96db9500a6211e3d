//! Working tree status inspection
//!
//! - `file_change`: how a file differs from what the repository expects
//! - `inspector`: compares expected content against the disk
//! - `status_info`: collects the sections of the status report

pub mod file_change;
pub mod inspector;
pub mod status_info;
