use crate::areas::repository::Repository;

impl Repository {
    /// Move the active branch to an arbitrary commit and check it out
    pub async fn reset(&mut self, commit_ref: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve(commit_ref)?;
        let target = self.database().load(&target_oid)?;
        let (_, current) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        self.migrate_to(&mut index, &current, &target)?;
        self.refs().update_head(&target_oid)?;

        Ok(())
    }
}
