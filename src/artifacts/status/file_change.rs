use colored::Colorize;

/// Difference between a tracked file's expected content and the disk
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        write!(f, "({})", label)
    }
}

/// Section of the status report a file is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeType {
    Staged,
    Removed,
    Unstaged,
    Untracked,
}

impl FileChangeType {
    /// Paint `line` with the color of this section
    pub fn paint(&self, line: &str) -> String {
        match self {
            FileChangeType::Staged => line.green().to_string(),
            FileChangeType::Removed | FileChangeType::Unstaged | FileChangeType::Untracked => {
                line.red().to_string()
            }
        }
    }
}
