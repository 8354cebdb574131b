//! Status report
//!
//! ```text
//! === Branches ===
//! *master
//! other-branch
//!
//! === Staged Files ===
//! wug.txt
//!
//! === Removed Files ===
//! goodbye.txt
//!
//! === Modifications Not Staged For Commit ===
//! junk.txt (deleted)
//! wug3.txt (modified)
//!
//! === Untracked Files ===
//! random.stuff
//!
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Working files by path, each with the blob ID its content hashes to
pub type WorkingFiles = BTreeMap<PathBuf, ObjectId>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: Option<BranchName>,
    pub(crate) staged_files: BTreeSet<PathBuf>,
    pub(crate) removed_files: BTreeSet<PathBuf>,
    pub(crate) workspace_changeset: BTreeMap<PathBuf, WorkspaceChangeType>,
    pub(crate) untracked_files: BTreeSet<PathBuf>,
}

impl StatusInfo {
    /// Build the report
    ///
    /// # Arguments
    ///
    /// * `head_tree` - Tree of the commit HEAD points to
    /// * `staged` - Staged additions
    /// * `removed` - Staged removals
    /// * `working` - Every file in the working tree
    pub fn new(
        branches: Vec<BranchName>,
        current_branch: BranchName,
        head_tree: &Tree,
        staged: &Tree,
        removed: &Tree,
        working: &WorkingFiles,
    ) -> Self {
        let mut workspace_changeset = BTreeMap::new();

        // tracked files with edits that were never staged
        for (path, oid) in head_tree {
            if staged.contains_key(path) || removed.contains_key(path) {
                continue;
            }
            match working.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        // staged files edited again after `add`
        for (path, oid) in staged {
            match working.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        let untracked_files = working
            .keys()
            .filter(|path| {
                (!head_tree.contains_key(*path) && !staged.contains_key(*path))
                    || removed.contains_key(*path)
            })
            .cloned()
            .collect();

        let mut branches = branches;
        branches.sort();

        StatusInfo {
            branches,
            current_branch: Some(current_branch),
            staged_files: staged.keys().cloned().collect(),
            removed_files: removed.keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        }
    }

    pub fn staged_files(&self) -> &BTreeSet<PathBuf> {
        &self.staged_files
    }

    pub fn removed_files(&self) -> &BTreeSet<PathBuf> {
        &self.removed_files
    }

    pub fn workspace_changeset(&self) -> &BTreeMap<PathBuf, WorkspaceChangeType> {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &BTreeSet<PathBuf> {
        &self.untracked_files
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if Some(branch) == self.current_branch.as_ref() {
                writeln!(f, "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(f, "{}", branch)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(f, "{}", path.display().to_string().green())?;
        }

        writeln!(f)?;
        writeln!(f, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(f, "{}", path.display().to_string().green())?;
        }

        writeln!(f)?;
        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(f, "{} {}", path.display(), change)?;
        }

        writeln!(f)?;
        writeln!(f, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(f, "{}", path.display().to_string().red())?;
        }

        writeln!(f)
    }
}
