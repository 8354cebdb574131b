use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use std::io::Write;

impl Repository {
    /// First-parent history from HEAD, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        for (oid, commit) in self.history(&head)? {
            write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
        }

        Ok(())
    }

    /// Every commit ever recorded, in object ID order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().list_commits()? {
            let commit = self.load_commit(&oid)?;
            write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
        }

        Ok(())
    }
}
