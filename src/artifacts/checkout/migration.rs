//! Working-tree migration between two snapshots
//!
//! Moving the working directory from the `current` snapshot to a `target`
//! snapshot happens in two phases:
//!
//! 1. Plan: refuse to run if a file the target would create already exists
//!    on disk without being tracked by the current snapshot, then record one
//!    delete per current file and one write per target file
//! 2. Apply: hand the plan to the workspace, deletions first
//!
//! Nothing is touched on disk until planning succeeded.

use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::errors::Precondition;
use std::collections::HashMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Remove a file tracked by the current snapshot
    Delete,
    /// Create or overwrite a file with the target's content
    Write,
}

/// Set of planned actions grouped by type
type ActionsSet = HashMap<ActionType, Vec<(String, Option<Blob>)>>;

pub struct Migration<'r> {
    workspace: &'r Workspace,
    current: &'r Snapshot,
    target: &'r Snapshot,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(workspace: &'r Workspace, current: &'r Snapshot, target: &'r Snapshot) -> Self {
        let actions = HashMap::from([
            (ActionType::Delete, Vec::new()),
            (ActionType::Write, Vec::new()),
        ]);

        Self {
            workspace,
            current,
            target,
            actions,
        }
    }

    pub fn actions_of(&self, action: &ActionType) -> impl Iterator<Item = (&str, Option<&Blob>)> {
        self.actions
            .get(action)
            .into_iter()
            .flatten()
            .map(|(name, blob)| (name.as_str(), blob.as_ref()))
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.workspace.apply_migration(self)
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        self.check_for_untracked()?;

        for name in self.current.keys() {
            self.actions
                .entry(ActionType::Delete)
                .or_default()
                .push((name.clone(), None));
        }
        for (name, blob) in self.target {
            self.actions
                .entry(ActionType::Write)
                .or_default()
                .push((name.clone(), Some(blob.clone())));
        }

        Ok(())
    }

    /// Fail if a file the target tracks but the current snapshot does not is
    /// already present in the working directory
    pub fn check_for_untracked(&self) -> anyhow::Result<()> {
        let in_the_way = untracked_in_the_way(self.workspace, self.current, self.target);

        if in_the_way.is_empty() {
            Ok(())
        } else {
            Err(Precondition::UntrackedFileInTheWay.into())
        }
    }
}

/// Names tracked by `target` but not by `current` that exist on disk
pub fn untracked_in_the_way<'t>(
    workspace: &Workspace,
    current: &Snapshot,
    target: &'t Snapshot,
) -> Vec<&'t str> {
    target
        .keys()
        .filter(|name| !current.contains_key(*name) && workspace.exists(name))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LitError, lit_error};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn snapshot(files: &[(&str, &str)]) -> Snapshot {
        files
            .iter()
            .map(|(name, content)| {
                (
                    name.to_string(),
                    Blob::new(name.to_string(), content.to_string()),
                )
            })
            .collect()
    }

    #[test]
    fn migration_replaces_current_files_with_target_files() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("old a").unwrap();
        dir.child("gone/b.txt").write_str("b").unwrap();
        dir.child("notes.md").write_str("untracked, left alone").unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let current = snapshot(&[("a.txt", "old a"), ("gone/b.txt", "b")]);
        let target = snapshot(&[("a.txt", "new a"), ("c.txt", "c")]);

        Migration::new(&workspace, &current, &target)
            .apply_changes()
            .unwrap();

        dir.child("a.txt").assert("new a");
        dir.child("c.txt").assert("c");
        dir.child("notes.md").assert("untracked, left alone");
        dir.child("gone").assert(predicates::path::missing());
    }

    #[test]
    fn untracked_file_in_the_way_aborts_before_any_change() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("tracked").unwrap();
        dir.child("c.txt").write_str("untracked").unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let current = snapshot(&[("a.txt", "tracked")]);
        let target = snapshot(&[("c.txt", "from target")]);

        assert_eq!(
            untracked_in_the_way(&workspace, &current, &target),
            vec!["c.txt"]
        );

        let error = Migration::new(&workspace, &current, &target)
            .apply_changes()
            .unwrap_err();

        assert_eq!(
            lit_error(&error),
            Some(LitError::PreconditionFailed(
                Precondition::UntrackedFileInTheWay
            ))
        );
        dir.child("a.txt").assert("tracked");
        dir.child("c.txt").assert("untracked");
    }
}
