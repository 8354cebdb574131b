//! Staging area
//!
//! The staging area holds the delta the next commit folds onto HEAD's tree:
//!
//! - `added`: path → blob ID to insert or overwrite
//! - `removed`: path → blob ID HEAD tracked, to delete
//!
//! A path is never in both maps. Recording an addition drops any pending
//! removal of the same path and vice versa.
//!
//! ## Persistence
//!
//! The maps are rehydrated from `.twig/index` before every operation and
//! written back after it succeeds (see [`crate::artifacts::index`] for the
//! format). The file ends with a SHA-1 checksum which is verified on load.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::stage_entry::{ENTRY_PREFIX_SIZE, StageEntry};
use crate::artifacts::index::stage_header::StageHeader;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging file (typically `.twig/index`)
    path: Box<Path>,
    added: Tree,
    removed: Tree,
    /// Flag indicating if the staging area has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: Tree::new(),
            removed: Tree::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn added(&self) -> &Tree {
        &self.added
    }

    pub fn removed(&self) -> &Tree {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Stage `path` with content `oid`, cancelling a pending removal
    pub fn record_add(&mut self, path: PathBuf, oid: ObjectId) {
        self.removed.remove(&path);
        debug!(path = %path.display(), oid = %oid, "staged addition");
        self.added.insert(path, oid);
        self.changed = true;
    }

    /// Stage the removal of `path`, which HEAD tracks as `prior_oid`
    pub fn record_remove(&mut self, path: PathBuf, prior_oid: ObjectId) {
        self.added.remove(&path);
        debug!(path = %path.display(), oid = %prior_oid, "staged removal");
        self.removed.insert(path, prior_oid);
        self.changed = true;
    }

    /// Drop whatever is staged for `path`
    pub fn unstage(&mut self, path: &Path) -> bool {
        let unstaged = self.added.remove(path).is_some() | self.removed.remove(path).is_some();
        self.changed |= unstaged;
        unstaged
    }

    /// Fold the staged delta onto `parent_tree`
    pub fn build_snapshot(&self, parent_tree: &Tree) -> Tree {
        let mut tree = parent_tree.clone();

        for (path, oid) in &self.added {
            tree.insert(path.clone(), oid.clone());
        }
        for path in self.removed.keys() {
            tree.remove(path);
        }

        tree
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.added.clear();
        self.removed.clear();
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty file is an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the staging file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.added.clear();
        self.removed.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = Self::parse_header(&mut reader)?;
        self.added = Self::parse_entries(header.added_count, &mut reader)?;
        self.removed = Self::parse_entries(header.removed_count, &mut reader)?;

        reader.verify()?;

        if self.added.keys().any(|path| self.removed.contains_key(path)) {
            return Err(
                TwigError::Corrupt("staging area: path both added and removed".into()).into(),
            );
        }

        Ok(())
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<StageHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StageHeader::deserialize(std::io::Cursor::new(header_bytes))?;
        header.validate()?;

        Ok(header)
    }

    fn parse_entries(entries_count: u32, reader: &mut Checksum) -> anyhow::Result<Tree> {
        let mut entries = Tree::new();

        for _ in 0..entries_count {
            let prefix = reader.read(ENTRY_PREFIX_SIZE)?;
            let path = reader.read(StageEntry::path_len(&prefix)?)?;

            let entry_bytes = [prefix.as_ref(), path.as_ref()].concat();
            let entry = StageEntry::deserialize(std::io::Cursor::new(entry_bytes))?;

            entries.insert(entry.path, entry.oid);
        }

        Ok(entries)
    }

    /// Write the staging area back to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the staging file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = StageHeader::for_counts(self.added.len(), self.removed.len())?;
        writer.write(&header.serialize()?)?;

        for (path, oid) in self.added.iter().chain(self.removed.iter()) {
            let entry = StageEntry::new(path.clone(), oid.clone());
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
