use crate::areas::repository::Repository;
use crate::errors::Missing;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut commit_oids = self.database().list_objects()?;
        commit_oids.sort();

        let mut found = false;
        for commit_oid in commit_oids {
            if self.database().load(&commit_oid)?.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                found = true;
            }
        }

        if !found {
            return Err(Missing::CommitWithMessage.into());
        }

        Ok(())
    }
}
