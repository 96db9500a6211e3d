use crate::areas::repository::Repository;
use crate::artifacts::log::history::History;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// History of the active branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;

        for entry in History::new(self.database(), head_oid) {
            let (commit_oid, commit) = entry?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit ever made, in id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut commit_oids = self.database().list_objects()?;
        commit_oids.sort();

        for commit_oid in commit_oids {
            let commit = self.database().load(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid)?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
