//! Typed errors raised by repository operations
//!
//! User errors are expected outcomes of a command (bad input, a state that
//! forbids the operation); they are detected before any mutation. Integrity
//! errors mean the on-disk state no longer satisfies the store invariants.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TwigError {
    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound(PathBuf),

    #[error("No reason to remove the file.")]
    NothingToRemove(PathBuf),

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No commit with that id exists.")]
    UnknownCommit(String),

    #[error("Commit id {prefix} is ambiguous ({candidates} candidates).")]
    AmbiguousCommit { prefix: String, candidates: usize },

    #[error("File does not exist in that commit.")]
    FileNotInCommit(PathBuf),

    #[error("No such branch exists.")]
    UnknownBranch(String),

    #[error("A branch with that name does not exist.")]
    MissingBranch(String),

    #[error("A branch with that name already exists.")]
    DuplicateBranch(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch(String),

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf(String),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.\n{0}")]
    UntrackedFileInTheWay(String),

    #[error("Found no commit with that message.")]
    NoMatchingCommit(String),

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("object {0} not found in the store")]
    NotFound(ObjectId),

    #[error("no common ancestor between {0} and {1}")]
    NoCommonAncestor(ObjectId, ObjectId),

    #[error("corrupt {0}")]
    Corrupt(String),
}

impl TwigError {
    /// Integrity errors are everything the user cannot cause through the CLI.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            TwigError::NotFound(_) | TwigError::NoCommonAncestor(..) | TwigError::Corrupt(_)
        )
    }
}
