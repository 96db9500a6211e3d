use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::LitError;
use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(LitError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .lit/objects directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .lit/branches directory")?;

        let root_oid = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs().create_branch(&default_branch, &root_oid)?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        self.ledger().store(&BTreeSet::new())?;

        let index = self.index();
        let mut index = index.lock().await;
        index
            .write_updates()
            .context("Failed to create .lit/index file")?;

        Ok(())
    }
}
