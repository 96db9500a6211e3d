//! Checkout operations
//!
//! Switching the working directory between commits is planned in full
//! (including the untracked-file check) before any file is touched.

pub mod migration;
