use crate::areas::repository::Repository;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Move the current branch and HEAD to a commit, rewriting the working tree
    pub fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        let target_id = self.resolve_commit(commit)?;
        let target = self.load_commit(&target_id)?;
        let (_, head) = self.head_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        self.migrate_working_tree(head.tree(), target.tree())?;

        let branch = self.refs().current_branch()?;
        self.refs().update_branch(&branch, &target_id)?;
        self.refs().update_head(&target_id)?;

        index.clear();
        index.write_updates()?;

        info!(branch = %branch, oid = %target_id, "reset");
        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_id.to_short_oid(),
            target.short_message()
        )?;

        Ok(())
    }
}
