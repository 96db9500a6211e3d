//! Branch references and HEAD
//!
//! Every branch is a file under `.lit/branches/` holding the full id of the
//! branch's tip commit. `.lit/HEAD` holds the name of the active branch;
//! HEAD never points directly at a commit.
//!
//! Ref files are written under an exclusive `file-guard` lock.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Missing, Precondition};
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

pub const HEAD_REF_NAME: &str = "HEAD";
pub const BRANCHES_DIR: &str = "branches";

/// Branch and HEAD reference manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.lit`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the active branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Make `branch_name` the active branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), branch_name.as_ref())
    }

    /// Tip of the active branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?
            .with_context(|| format!("active branch {} has no ref file", current_branch))
    }

    /// Move the active branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current_branch = self.current_branch()?;
        self.update_branch(&current_branch, oid)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(Precondition::BranchExists.into());
        }

        self.update_branch(name, source_oid)
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self.read_branch(name)?.ok_or(Missing::Branch)?;

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let mut branches = WalkDir::new(self.branches_path())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| BranchName::try_parse(entry.file_name().to_string_lossy().to_string()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.path.join(BRANCHES_DIR).into_boxed_path()
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.branches_path()
            .join(branch_name.as_ref())
            .into_boxed_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LitError, lit_error};
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    const OID: &str = "3f786850e387550fdab836ed7e6dc881de23001b";

    fn refs_with_master(dir: &TempDir) -> Refs {
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        let master = BranchName::default_branch();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();

        refs.create_branch(&master, &oid).unwrap();
        refs.set_head(&master).unwrap();
        refs
    }

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    #[test]
    fn head_follows_the_active_branch() {
        let dir = TempDir::new().unwrap();
        let refs = refs_with_master(&dir);
        let new_oid = ObjectId::try_parse("a".repeat(40)).unwrap();

        refs.update_head(&new_oid).unwrap();

        assert_eq!(refs.current_branch().unwrap(), BranchName::default_branch());
        assert_eq!(refs.read_head().unwrap(), new_oid);
        assert_eq!(
            refs.read_branch(&BranchName::default_branch()).unwrap(),
            Some(new_oid)
        );
    }

    #[test]
    fn duplicate_branch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let refs = refs_with_master(&dir);
        let oid = refs.read_head().unwrap();

        refs.create_branch(&branch("dev"), &oid).unwrap();
        let error = refs.create_branch(&branch("dev"), &oid).unwrap_err();

        assert_eq!(
            lit_error(&error),
            Some(LitError::PreconditionFailed(Precondition::BranchExists))
        );
        assert_eq!(
            refs.list_branches().unwrap(),
            vec![branch("dev"), branch("master")]
        );
    }

    #[test]
    fn deleting_a_missing_branch_fails() {
        let dir = TempDir::new().unwrap();
        let refs = refs_with_master(&dir);

        let error = refs.delete_branch(&branch("ghost")).unwrap_err();

        assert_eq!(
            lit_error(&error),
            Some(LitError::NotFound(Missing::Branch))
        );
    }
}
