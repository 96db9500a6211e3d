use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Missing, Precondition};

impl Repository {
    /// Create a branch pointing at HEAD's commit
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &source_oid)?;

        Ok(())
    }

    /// Delete a branch reference; its commits stay in the object store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| Missing::Branch)?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(Missing::Branch.into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(Precondition::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
