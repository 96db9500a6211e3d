//! User-facing commands
//!
//! Each command is an `impl Repository` block in its own file.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage a file for the next commit
//! - `commit`: Record the staged changes
//! - `rm`: Unstage a file or stage its removal
//! - `log`: Show the active branch's history, or every commit
//! - `find`: Look up commits by message
//! - `status`: Show branches, staged changes and working tree state
//! - `checkout`: Restore files or switch branches
//! - `branch`: Create or delete branches
//! - `reset`: Move the active branch to another commit
//! - `merge`: Merge another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
