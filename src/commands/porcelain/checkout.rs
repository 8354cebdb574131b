use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Tree;
use std::io::Write;
use tracing::{debug, info};

impl Repository {
    /// Restore one file from a commit (HEAD when `commit` is omitted)
    ///
    /// Whatever file sits at `path` is overwritten, but untracked files in the
    /// way of the directory layout are not. The staging area is left alone.
    pub fn checkout_file(&mut self, commit: Option<&str>, path: &str) -> anyhow::Result<()> {
        let commit_id = match commit {
            Some(prefix) => self.resolve_commit(prefix)?,
            None => self.refs().read_head()?,
        };
        let commit = self.load_commit(&commit_id)?;
        let path = self.workspace().relative_path(path)?;

        let blob_id = commit
            .blob_for(&path)
            .ok_or_else(|| TwigError::FileNotInCommit(path.clone()))?;
        let blob = self.database().parse_blob(blob_id)?;

        let (_, head) = self.head_commit()?;
        UntrackedGuard::new(self.workspace(), head.tree()).check_placement([path.as_path()])?;

        debug!(path = %path.display(), commit = %commit_id, "restoring file");
        self.workspace().write_file(&path, blob.content())
    }

    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| TwigError::UnknownBranch(name.to_string()))?;
        let target_id = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| TwigError::UnknownBranch(name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::AlreadyOnBranch(name.to_string()).into());
        }

        let (_, head) = self.head_commit()?;
        let target = self.load_commit(&target_id)?;

        let mut index = self.index();
        index.rehydrate()?;

        self.migrate_working_tree(head.tree(), target.tree())?;

        self.refs().update_head(&target_id)?;
        self.refs().set_current_branch(&branch_name)?;

        index.clear();
        index.write_updates()?;

        info!(branch = %branch_name, oid = %target_id, "checked out branch");
        writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;

        Ok(())
    }

    /// Rewrite the working tree from `current` to `target`
    ///
    /// Refuses before touching anything when an untracked file would be
    /// overwritten.
    pub(crate) fn migrate_working_tree(&self, current: &Tree, target: &Tree) -> anyhow::Result<()> {
        let migration = Migration::new(current, target);

        UntrackedGuard::new(self.workspace(), current).check(migration.writes())?;

        self.workspace().apply_migration(&migration, |oid| {
            Ok(self.database().parse_blob(oid)?.into_content())
        })
    }
}
