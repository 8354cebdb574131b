use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;

impl Repository {
    /// Unstage `path`, or stage its removal when HEAD tracks it
    ///
    /// Removing a tracked file also deletes it from the working tree.
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(path)?;
        let (_, head) = self.head_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        if index.removed().contains_key(&path) {
            return Ok(());
        }

        match head.blob_for(&path) {
            Some(prior_oid) => {
                index.record_remove(path.clone(), prior_oid.clone());
                index.write_updates()?;
                self.workspace().remove_file(&path)?;
            }
            None if index.added().contains_key(&path) => {
                index.unstage(&path);
                index.write_updates()?;
            }
            None => return Err(TwigError::NothingToRemove(path).into()),
        }

        Ok(())
    }
}
