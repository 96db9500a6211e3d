use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status_info = Status::new(self).initialize(&index)?;

        self.print_branches(&status_info)?;
        self.print_section(
            "Staged Files",
            status_info.staged_files.iter().cloned(),
            FileChangeType::Staged,
        )?;
        self.print_section(
            "Removed Files",
            status_info.removed_files.iter().cloned(),
            FileChangeType::Removed,
        )?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(file, change)| format!("{} {}", file, change)),
            FileChangeType::Unstaged,
        )?;
        self.print_section(
            "Untracked Files",
            status_info.untracked_files.iter().cloned(),
            FileChangeType::Untracked,
        )?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &status_info.branches {
            if branch == &status_info.current_branch {
                writeln!(writer, "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl Iterator<Item = String>,
        change_type: FileChangeType,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {} ===", title)?;
        for line in lines {
            writeln!(writer, "{}", change_type.paint(&line))?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
