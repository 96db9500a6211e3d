use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{Missing, Precondition};

impl Repository {
    /// Restore `name` to the content HEAD tracks for it
    pub fn checkout_file_from_head(&self, name: &str) -> anyhow::Result<()> {
        let (_, head) = self.head_commit()?;

        if !self.workspace().exists(name) {
            return Err(Missing::FileInCommit.into());
        }

        self.restore_file(&head, name)
    }

    /// Restore `name` to its content in the commit `commit_ref` abbreviates
    pub fn checkout_file_from_commit(&self, commit_ref: &str, name: &str) -> anyhow::Result<()> {
        let commit_oid = self.database().resolve(commit_ref)?;
        let commit = self.database().load(&commit_oid)?;

        self.restore_file(&commit, name)
    }

    /// Make `name` the active branch and its tip the working tree
    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(name.to_string()).map_err(|_| Missing::CheckoutBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(Precondition::AlreadyOnBranch.into());
        }

        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(Missing::CheckoutBranch)?;

        let (_, current) = self.head_commit()?;
        let target = self.database().load(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        self.migrate_to(&mut index, &current, &target)?;
        self.refs().set_head(&branch_name)?;

        Ok(())
    }

    /// Replace the working tree of `current` with the one of `target`
    ///
    /// Fails before touching anything when an untracked file is in the way.
    /// Afterwards the index is empty and the ledger lists the target's files;
    /// moving refs is up to the caller.
    pub(crate) fn migrate_to(
        &self,
        index: &mut Index,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        let mut migration = Migration::new(self.workspace(), current.blobs(), target.blobs());
        migration.apply_changes()?;

        index.clear();
        index.write_updates()?;
        self.ledger().replace(target.blobs().keys())?;

        Ok(())
    }

    fn restore_file(&self, commit: &Commit, name: &str) -> anyhow::Result<()> {
        let blob = commit.blob(name).ok_or(Missing::FileInCommit)?;

        self.workspace().write_file(name, blob.content())
    }
}
