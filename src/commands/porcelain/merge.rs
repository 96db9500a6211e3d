use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::untracked_in_the_way;
use crate::artifacts::merge::conflict::conflict_text;
use crate::artifacts::merge::resolution::{MergeAction, MergePlan};
use crate::artifacts::merge::split_finder::{MergeBase, SplitFinder, debug_log};
use crate::errors::{LitError, Missing, Precondition};

impl Repository {
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if !index.is_clean() {
            return Err(Precondition::UncommittedChanges.into());
        }

        let other_branch =
            BranchName::try_parse(target.to_string()).map_err(|_| Missing::Branch)?;
        let other_oid = self
            .refs()
            .read_branch(&other_branch)?
            .ok_or(Missing::Branch)?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == other_branch {
            return Err(Precondition::SelfMerge.into());
        }

        let (head_oid, current) = self.head_commit()?;
        let other = self.database().load(&other_oid)?;

        let merge_base = {
            let database = self.database();
            let split_finder =
                SplitFinder::new(|oid| Ok(database.load(oid)?.parent().cloned()));

            split_finder.find_merge_base(&head_oid, &other_oid)?
        };

        let split_oid = match merge_base {
            MergeBase::Ancestor => return Err(Precondition::AncestorMerge.into()),
            MergeBase::FastForward => {
                self.migrate_to(&mut index, &current, &other)?;
                self.refs().update_head(&other_oid)?;

                return Err(Precondition::FastForwarded.into());
            }
            MergeBase::Split(split_oid) => split_oid,
        };
        debug_log!(
            "merging {} into {} from split {}",
            other_oid,
            head_oid,
            split_oid
        );

        if !untracked_in_the_way(self.workspace(), current.blobs(), other.blobs()).is_empty() {
            return Err(Precondition::UntrackedFileInTheWay.into());
        }

        let split = self.database().load(&split_oid)?;
        let plan = MergePlan::build(split.blobs(), current.blobs(), other.blobs());

        self.apply_merge_plan(&mut index, &plan)?;

        if plan.is_conflicted() {
            index.write_updates()?;
            return Err(LitError::Conflict.into());
        }

        let message = format!("Merged {} with {}.", current_branch, other_branch);
        self.commit_index(&mut index, &message)?;

        Ok(())
    }

    fn apply_merge_plan(&self, index: &mut Index, plan: &MergePlan) -> anyhow::Result<()> {
        for action in plan.actions() {
            match action {
                MergeAction::TakeOther(blob) => {
                    self.workspace().write_file(blob.name(), blob.content())?;
                    self.ledger().insert(blob.name())?;
                    index.add(blob.clone());
                }
                MergeAction::Remove(name) => {
                    self.workspace().remove_file(name)?;
                    self.ledger().remove(name)?;
                    index.remove(name);
                }
                MergeAction::Conflict {
                    name,
                    current,
                    other,
                } => {
                    let text = conflict_text(current.as_ref(), other.as_ref());
                    self.workspace().write_file(name, &text)?;
                }
            }
        }

        Ok(())
    }
}
