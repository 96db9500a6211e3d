use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// First-parent history starting at a commit, newest first
///
/// Cloning the history restarts the walk from the same starting point.
#[derive(Clone, new)]
pub struct History<'r> {
    database: &'r Database,
    start: ObjectId,
}

impl<'r> IntoIterator for History<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = HistoryIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        HistoryIntoIter {
            database: self.database,
            current_commit_oid: Some(self.start),
        }
    }
}

#[derive(Clone)]
pub struct HistoryIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for HistoryIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.load(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // a broken link ends the walk after reporting it
            Err(error) => Some(Err(error)),
        }
    }
}
