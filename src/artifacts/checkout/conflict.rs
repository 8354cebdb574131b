use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictType {
    /// An untracked file holds content that differs from what would be written
    UntrackedOverwritten,
    /// An untracked file or directory sits where something else must go
    UntrackedRemoved,
}

/// Refuses working tree updates that would destroy untracked files
///
/// A file is untracked when the commit HEAD points to does not track it.
#[derive(Debug)]
pub struct UntrackedGuard<'r> {
    workspace: &'r Workspace,
    tracked: &'r Tree,
}

impl<'r> UntrackedGuard<'r> {
    pub fn new(workspace: &'r Workspace, tracked: &'r Tree) -> Self {
        UntrackedGuard { workspace, tracked }
    }

    /// Fail with `UntrackedFileInTheWay` if writing `incoming` would clobber an
    /// untracked file
    pub fn check<'p>(
        &self,
        incoming: impl IntoIterator<Item = (&'p Path, &'p ObjectId)>,
    ) -> anyhow::Result<()> {
        let mut conflicts = BTreeMap::new();

        for (path, oid) in incoming {
            if let Some((conflict_path, conflict_type)) = self.conflict_for(path, oid)? {
                conflicts.insert(conflict_path, conflict_type);
            }
        }

        Self::report(conflicts)
    }

    /// Like [`UntrackedGuard::check`], but whatever sits at each path itself
    /// may be overwritten; only untracked files in the way of the directory
    /// layout are refused
    pub fn check_placement<'p>(
        &self,
        paths: impl IntoIterator<Item = &'p Path>,
    ) -> anyhow::Result<()> {
        let mut conflicts = BTreeMap::new();

        for path in paths {
            if let Some((conflict_path, conflict_type)) = self.placement_conflict(path)? {
                conflicts.insert(conflict_path, conflict_type);
            }
        }

        Self::report(conflicts)
    }

    fn report(conflicts: BTreeMap<PathBuf, ConflictType>) -> anyhow::Result<()> {
        if conflicts.is_empty() {
            return Ok(());
        }

        for (path, conflict_type) in &conflicts {
            debug!(path = %path.display(), ?conflict_type, "untracked file in the way");
        }

        let paths = conflicts
            .keys()
            .map(|path| format!("\t{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n");

        Err(TwigError::UntrackedFileInTheWay(paths).into())
    }

    fn conflict_for(
        &self,
        path: &Path,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<(PathBuf, ConflictType)>> {
        if let Some(conflict) = self.placement_conflict(path)? {
            return Ok(Some(conflict));
        }

        // a directory of tracked files is cleared before the write
        if self.workspace.is_dir(path)
            || self.tracked.contains_key(path)
            || !self.workspace.is_file(path)
        {
            return Ok(None);
        }

        let working_blob = Blob::new(self.workspace.read_file(path)?);
        if working_blob.object_id()? == *oid {
            return Ok(None);
        }

        Ok(Some((path.to_path_buf(), ConflictType::UntrackedOverwritten)))
    }

    fn placement_conflict(&self, path: &Path) -> anyhow::Result<Option<(PathBuf, ConflictType)>> {
        // a file where one of the parent directories has to be
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                continue;
            }
            if self.workspace.is_file(parent) && !self.tracked.contains_key(parent) {
                return Ok(Some((parent.to_path_buf(), ConflictType::UntrackedRemoved)));
            }
        }

        // a directory where the file has to be
        if self.workspace.is_dir(path) {
            let untracked = self
                .workspace
                .list_files_in(path)?
                .into_iter()
                .find(|file| !self.tracked.contains_key(file));

            if let Some(file) = untracked {
                return Ok(Some((file, ConflictType::UntrackedRemoved)));
            }
        }

        Ok(None)
    }
}
