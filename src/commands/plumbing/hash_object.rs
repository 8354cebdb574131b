use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the blob ID of a working file, storing the blob when `write` is set
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<ObjectId> {
        let object_path = self.workspace().relative_path(object_path)?;
        if !self.workspace().is_file(&object_path) {
            return Err(TwigError::FileNotFound(object_path).into());
        }

        let blob = self.workspace().parse_blob(&object_path)?;
        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if write {
            self.database().store(&blob)?;
        }

        Ok(object_id)
    }
}
