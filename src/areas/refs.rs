//! Branches, HEAD and the active branch
//!
//! ## Layout
//!
//! - `refs/heads/<name>`: the commit a branch points to
//! - `HEAD`: the commit the working tree reflects
//! - `current`: the name of the active branch
//!
//! Every file holds a single line. Branch names may contain `/`, in which case
//! the ref lives in nested directories under `refs/heads`.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

pub const HEAD_REF_NAME: &str = "HEAD";

pub const CURRENT_REF_NAME: &str = "current";

/// Reference manager rooted at the metadata directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let content = self.read_ref_file(&self.head_path())?;
        ObjectId::try_parse(content)
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        debug!(oid = %oid, "moving HEAD");
        self.update_ref_file(&self.head_path(), oid.as_ref())
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = self.read_ref_file(&self.current_path())?;
        BranchName::try_parse(content)
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        debug!(branch = %name, "switching active branch");
        self.update_ref_file(&self.current_path(), name.as_ref())
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    /// The commit a branch points to, `None` when no such branch exists
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(name.as_ref());

        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = self.read_ref_file(&branch_path)?;
        Ok(Some(ObjectId::try_parse(content)?))
    }

    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.read_branch(name)?.is_some() {
            return Err(TwigError::DuplicateBranch(name.to_string()).into());
        }

        debug!(branch = %name, oid = %oid, "creating branch");
        self.update_ref_file(&self.heads_path().join(name.as_ref()), oid.as_ref())
    }

    /// Point an existing or new branch at `oid`
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        debug!(branch = %name, oid = %oid, "updating branch");
        self.update_ref_file(&self.heads_path().join(name.as_ref()), oid.as_ref())
    }

    /// Remove a branch ref, returning the commit it pointed to
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(name)?
            .ok_or_else(|| TwigError::MissingBranch(name.to_string()))?;
        let branch_path = self.heads_path().join(name.as_ref());

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        debug!(branch = %name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// Every branch, in name order
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        Ok(content.trim().to_string())
    }

    /// Overwrite a ref file while holding an exclusive lock on it
    pub fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;
        lock.deref_mut().write_all(b"\n")?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn current_path(&self) -> Box<Path> {
        self.path.join(CURRENT_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
