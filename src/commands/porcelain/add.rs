use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;

impl Repository {
    /// Stage the working copy of `path` for the next commit
    ///
    /// A file whose content matches HEAD's version ends up with nothing staged,
    /// which also cancels an earlier `rm` of it.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(path)?;

        if !self.workspace().is_file(&path) {
            return Err(TwigError::FileNotFound(path).into());
        }

        let (_, head) = self.head_commit()?;

        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = self.database().store(&blob)?;

        if head.blob_for(&path) == Some(&blob_id) {
            index.unstage(&path);
        } else {
            index.record_add(path, blob_id);
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
