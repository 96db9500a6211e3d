use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::errors::Missing;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".lit", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    /// Capture the current content of `name` as a blob
    pub fn read_blob(&self, name: &str) -> anyhow::Result<Blob> {
        if !self.exists(name) {
            return Err(Missing::File.into());
        }

        Ok(Blob::new(name.to_string(), self.read_file(name)?))
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .with_context(|| format!("Failed to read file: {:?}", file_path))
    }

    /// Create or overwrite `name`, creating parent directories as needed
    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete `name` if present
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    /// Every regular file under the working root, relative to it, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_name(entry.path()))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;

        Some(
            relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    // Deletions run before writes so a file that moves between the two
    // snapshots ends up with the target content.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Write] {
            for (name, blob) in migration.actions_of(&action) {
                match (&action, blob) {
                    (ActionType::Delete, _) => {
                        self.remove_file(name)?;
                        self.remove_empty_parents(name)?;
                    }
                    (ActionType::Write, Some(blob)) => self.write_file(name, blob.content())?,
                    (ActionType::Write, None) => {
                        anyhow::bail!("Write action for {name} carries no content")
                    }
                }
            }
        }

        Ok(())
    }

    // children before parents, stopping at the first non-empty directory
    fn remove_empty_parents(&self, name: &str) -> anyhow::Result<()> {
        for ancestor in Path::new(name).ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }

            let dir_path: PathBuf = self.path.join(ancestor);
            if !dir_path.is_dir() || std::fs::read_dir(&dir_path)?.next().is_some() {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Failed to remove directory: {:?}", dir_path))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_files_skips_the_repository_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("nested/a.txt").write_str("a").unwrap();
        dir.child(".lit/HEAD").write_str("master").unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        assert_eq!(
            workspace.list_files().unwrap(),
            vec!["b.txt".to_string(), "nested/a.txt".to_string()]
        );
    }

    #[test]
    fn reading_a_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let error = workspace.read_blob("ghost.txt").unwrap_err();

        assert_eq!(
            crate::errors::lit_error(&error),
            Some(crate::errors::LitError::NotFound(Missing::File))
        );
    }

    #[test]
    fn write_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        workspace.write_file("deep/er/c.txt", b"c").unwrap();

        dir.child("deep/er/c.txt").assert("c");
    }
}
