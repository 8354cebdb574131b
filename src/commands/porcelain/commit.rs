use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let commit_id = self.write_commit(message, None)?;
        let commit = self.load_commit(&commit_id)?;
        let branch = self.refs().current_branch()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }

    /// Fold the staging area onto HEAD's tree and record the result
    ///
    /// A merge commit (`second_parent` set) may be recorded with nothing staged.
    /// On success the current branch and HEAD point at the new commit and the
    /// staging area is empty.
    pub fn write_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        // stored verbatim; only a blank message is refused
        if message.trim().is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        if index.is_empty() && second_parent.is_none() {
            return Err(TwigError::NothingToCommit.into());
        }

        let (head_id, head) = self.head_commit()?;
        let tree = index.build_snapshot(head.tree());
        let timestamp = Commit::timestamp_from_env()?;

        let commit = Commit::new(head_id, second_parent, tree, message.to_string(), timestamp);
        let commit_id = self.database().store(&commit)?;

        let branch = self.refs().current_branch()?;
        self.refs().update_branch(&branch, &commit_id)?;
        self.refs().update_head(&commit_id)?;

        index.clear();
        index.write_updates()?;

        info!(
            branch = %branch,
            oid = %commit_id,
            paths = commit.tree().len(),
            merge = commit.is_merge(),
            "recorded commit"
        );

        Ok(commit_id)
    }
}
