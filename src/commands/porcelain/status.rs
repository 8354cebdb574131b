use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use std::io::Write;

// Terminology:
// - staged/removed files: paths recorded in the staging area
// - modified/deleted files: tracked or staged paths whose working copy no
//   longer matches what would be committed
// - untracked files: working files neither HEAD nor the staging area knows
impl Repository {
    pub fn status(&self) -> anyhow::Result<StatusInfo> {
        let (_, head) = self.head_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        let working_files = self.workspace().hash_files()?;
        let status = StatusInfo::new(
            self.refs().list_branches()?,
            self.refs().current_branch()?,
            head.tree(),
            index.added(),
            index.removed(),
            &working_files,
        );
        drop(index);

        write!(self.writer(), "{}", status)?;

        Ok(status)
    }
}
