use crate::areas::repository::Repository;

impl Repository {
    pub async fn add(&mut self, name: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let blob = self.workspace().read_blob(name)?;
        let (_, head) = self.head_commit()?;

        // staging the committed content again only cancels pending changes
        if head
            .blob(name)
            .is_some_and(|tracked| tracked.content() == blob.content())
        {
            index.discard(name);
        } else {
            index.add(blob);
        }

        self.ledger().insert(name)?;

        if index.has_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
