use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl<'r> Inspector<'r> {
    /// Compare the expected content of a file against the disk
    ///
    /// Returns `None` when the file exists with exactly that content.
    pub fn check_blob_against_workspace(
        &self,
        expected: &Blob,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.workspace.exists(expected.name()) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        let content = self.workspace.read_file(expected.name())?;
        if expected.has_content(&content) {
            Ok(None)
        } else {
            Ok(Some(WorkspaceChangeType::Modified))
        }
    }
}
