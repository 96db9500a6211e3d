//! Domain errors reported to the user
//!
//! Every failure a command can report is one of the variants below. Commands
//! return `anyhow::Result`, so these travel inside `anyhow::Error` and are
//! recovered with [`lit_error`] by the binary when deciding how to report them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LitError {
    #[error("{0}")]
    Usage(String),

    #[error("Not in an initialized lit directory.")]
    NotInitialized,

    #[error("A lit version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("{0}")]
    NotFound(#[from] Missing),

    #[error("{0}")]
    PreconditionFailed(#[from] Precondition),

    #[error("Encountered a merge conflict.")]
    Conflict,
}

/// Something the command needed could not be found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("File does not exist.")]
    File,

    #[error("File does not exist in that commit.")]
    FileInCommit,

    #[error("No commit with that id exists.")]
    Commit,

    #[error("Found no commit with that message.")]
    CommitWithMessage,

    #[error("No such branch exists.")]
    CheckoutBranch,

    #[error("A branch with that name does not exist.")]
    Branch,
}

/// The repository is not in a state that allows the command to run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingStaged,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Given branch is an ancestor of the current branch.")]
    AncestorMerge,

    #[error("Current branch fast-forwarded.")]
    FastForwarded,
}

/// Find the domain error behind an `anyhow::Error`, if there is one
///
/// `Missing` and `Precondition` values are usually propagated with `?`
/// directly, so they are lifted into their `LitError` kind here.
pub fn lit_error(error: &anyhow::Error) -> Option<LitError> {
    error
        .downcast_ref::<LitError>()
        .cloned()
        .or_else(|| error.downcast_ref::<Missing>().cloned().map(LitError::from))
        .or_else(|| {
            error
                .downcast_ref::<Precondition>()
                .cloned()
                .map(LitError::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_kinds_render_their_own_message() {
        let error: anyhow::Error = Precondition::SelfMerge.into();

        assert_eq!(error.to_string(), "Cannot merge a branch with itself.");
        assert_eq!(
            lit_error(&error),
            Some(LitError::PreconditionFailed(Precondition::SelfMerge))
        );
    }

    #[test]
    fn missing_commit_is_a_not_found_error() {
        let error: anyhow::Error = Missing::Commit.into();

        assert!(matches!(
            lit_error(&error),
            Some(LitError::NotFound(Missing::Commit))
        ));
    }
}
