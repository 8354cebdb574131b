//! Checkout migration
//!
//! A migration takes the working tree from the tree of one commit (the one
//! HEAD points to) to the tree of another:
//!
//! - Every path of the target tree is written, whether it is new (`Add`) or
//!   already tracked (`Modify`), so local edits to tracked files are replaced
//! - Every path only the old tree tracks is deleted (`Delete`)
//! - Files neither tree tracks are left alone
//!
//! Deletions are applied before writes so a tracked file standing where the
//! target needs a directory is gone by the time the directory is created.

use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite a tracked file
    Modify,
}

/// Planned changes from one tree to another, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    actions: BTreeMap<PathBuf, (ActionType, Option<ObjectId>)>,
}

impl Migration {
    pub fn new(from: &Tree, to: &Tree) -> Self {
        let mut actions = BTreeMap::new();

        for (path, oid) in to {
            let action = if from.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions.insert(path.clone(), (action, Some(oid.clone())));
        }

        for path in from.keys().filter(|path| !to.contains_key(*path)) {
            actions.insert(path.clone(), (ActionType::Delete, None));
        }

        Migration { actions }
    }

    pub fn actions(&self) -> impl Iterator<Item = (&Path, ActionType)> {
        self.actions
            .iter()
            .map(|(path, (action, _))| (path.as_path(), *action))
    }

    /// Files to write with the blob each receives
    pub fn writes(&self) -> impl Iterator<Item = (&Path, &ObjectId)> {
        self.actions
            .iter()
            .filter_map(|(path, (_, oid))| oid.as_ref().map(|oid| (path.as_path(), oid)))
    }

    pub fn deletions(&self) -> impl Iterator<Item = &Path> {
        self.actions
            .iter()
            .filter(|(_, (action, _))| *action == ActionType::Delete)
            .map(|(path, _)| path.as_path())
    }
}
