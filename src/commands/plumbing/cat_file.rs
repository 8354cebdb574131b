use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Print a blob's bytes or a commit's serialized body
    ///
    /// Commits may be named by an abbreviated ID; blobs need the full one. An
    /// ID naming no stored object is reported as an unknown commit.
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let stored = if object_id.len() == OBJECT_ID_LENGTH {
            ObjectId::try_parse(object_id.to_string())
                .ok()
                .filter(|oid| {
                    self.database().contains(ObjectType::Blob, oid)
                        || self.database().contains(ObjectType::Commit, oid)
                })
        } else {
            None
        };
        // anything else names a commit, or nothing at all
        let object_id = match stored {
            Some(oid) => oid,
            None => self.resolve_commit(object_id)?,
        };

        match self.database().parse_object(&object_id)? {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            commit @ ObjectBox::Commit(_) => writeln!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}
