//! Core repository components
//!
//! - `database`: object store for commits and the blobs embedded in them
//! - `index`: staging area for the next commit
//! - `ledger`: names tracked by the current lineage
//! - `refs`: branch references and HEAD
//! - `repository`: the context every command runs against
//! - `workspace`: working directory file system operations

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod ledger;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
