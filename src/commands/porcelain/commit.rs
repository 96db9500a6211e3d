use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Precondition;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        self.commit_index(&mut index, message)?;

        Ok(())
    }

    /// Turn the staged changes into a commit on top of HEAD
    ///
    /// The new commit's snapshot is HEAD's with every staged addition
    /// upserted and every staged removal dropped. On success the index is
    /// empty, the active branch points at the new commit and the ledger holds
    /// exactly the commit's file names.
    pub(crate) fn commit_index(
        &self,
        index: &mut Index,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(Precondition::EmptyCommitMessage.into());
        }
        if index.is_clean() {
            return Err(Precondition::NothingStaged.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let blobs = index.apply_to(head.blobs());
        let commit = Commit::new(
            head_oid,
            Commit::timestamp_from_env()?,
            blobs,
            message.to_string(),
        );

        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;
        self.ledger().replace(commit.blobs().keys())?;

        index.clear();
        index.write_updates()?;

        Ok(commit_id)
    }
}
