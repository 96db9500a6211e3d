use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let (_, head) = self.repository.head_commit()?;
        let tracked = self.repository.ledger().load()?;
        let inspector = Inspector::new(self.repository.workspace());

        let mut workspace_changeset = ChangeSet::new();

        for (name, blob) in index.additions() {
            if let Some(change) = inspector.check_blob_against_workspace(blob)? {
                workspace_changeset.insert(name.clone(), change);
            }
        }

        for (name, blob) in head.blobs() {
            if index.is_staged_for_addition(name) || index.is_staged_for_removal(name) {
                continue;
            }
            if let Some(change) = inspector.check_blob_against_workspace(blob)? {
                workspace_changeset.insert(name.clone(), change);
            }
        }

        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| !index.is_staged_for_addition(name))
            .filter(|name| {
                index.is_staged_for_removal(name)
                    || !(tracked.contains(name) || head.tracks(name))
            })
            .collect::<FileSet>();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}
