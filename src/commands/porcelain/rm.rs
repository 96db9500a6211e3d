use crate::areas::repository::Repository;
use crate::errors::Precondition;

impl Repository {
    pub async fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let (_, head) = self.head_commit()?;

        if head.tracks(name) {
            index.remove(name);
            self.workspace().remove_file(name)?;
        } else if !index.discard(name) {
            return Err(Precondition::NothingToRemove.into());
        }

        self.ledger().remove(name)?;
        index.write_updates()?;

        Ok(())
    }
}
