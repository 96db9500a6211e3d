//! Tracked-files ledger
//!
//! The set of file names the current lineage considers tracked, stored one
//! name per line in `.lit/tracked`. Status uses it to tell untracked files
//! apart from tracked ones that were deleted.

use anyhow::Context;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug)]
pub struct Ledger {
    path: Box<Path>,
}

impl Ledger {
    pub fn new(path: Box<Path>) -> Self {
        Ledger { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tracked names; a missing ledger is empty
    pub fn load(&self) -> anyhow::Result<BTreeSet<String>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read ledger at {:?}", self.path))?;

        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn store(&self, names: &BTreeSet<String>) -> anyhow::Result<()> {
        let content = names
            .iter()
            .map(|name| format!("{name}\n"))
            .collect::<String>();

        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write ledger at {:?}", self.path))
    }

    pub fn contains(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.load()?.contains(name))
    }

    pub fn insert(&self, name: &str) -> anyhow::Result<()> {
        let mut names = self.load()?;
        if names.insert(name.to_string()) {
            self.store(&names)?;
        }

        Ok(())
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let mut names = self.load()?;
        if names.remove(name) {
            self.store(&names)?;
        }

        Ok(())
    }

    /// Replace the ledger with exactly `names`
    pub fn replace<'n>(&self, names: impl IntoIterator<Item = &'n String>) -> anyhow::Result<()> {
        self.store(&names.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_remove_and_replace() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("tracked").into_boxed_path());

        assert!(ledger.load().unwrap().is_empty());

        ledger.insert("b.txt").unwrap();
        ledger.insert("a.txt").unwrap();
        ledger.insert("a.txt").unwrap();
        assert_eq!(
            std::fs::read_to_string(ledger.path()).unwrap(),
            "a.txt\nb.txt\n"
        );

        ledger.remove("a.txt").unwrap();
        assert!(!ledger.contains("a.txt").unwrap());

        let names = vec!["x.txt".to_string(), "y.txt".to_string()];
        ledger.replace(&names).unwrap();
        assert_eq!(
            ledger.load().unwrap().into_iter().collect::<Vec<_>>(),
            names
        );
    }
}
