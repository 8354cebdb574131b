//! Object store
//!
//! Content-addressed and append-only. Objects are kept per kind:
//!
//! ```text
//! .twig/objects/blobs/<oid>
//! .twig/objects/commits/<oid>
//! ```
//!
//! Each file holds the framed object (`<kind> <size>\0<body>`) and its name is
//! the SHA-1 of those bytes. Nothing is ever deleted, so storing an object
//! twice is a no-op and a crash mid-write leaves at most an orphan temp file.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable, hash_bytes};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the per-kind object directories
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let dir = self.path.join(object_type.dir_name());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_type.dir_name()).join(object_id.as_ref())
    }

    /// Persist `object` unless an identical one is already stored
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = hash_bytes(&object_content);
        let object_path = self.object_path(object.object_type(), &object_id);

        if object_path.exists() {
            debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        self.write_object(object_path, object_content)?;
        debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_path(object_type, object_id).is_file()
    }

    /// Read the framed bytes of an object, checking they still hash to its ID
    ///
    /// # Errors
    ///
    /// `NotFound` when no object of that kind has this ID, `Corrupt` when the
    /// stored bytes do not match it.
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_type, object_id);

        if !object_path.is_file() {
            return Err(TwigError::NotFound(object_id.clone()).into());
        }

        let object_content: Bytes = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?
            .into();

        if hash_bytes(&object_content) != *object_id {
            return Err(TwigError::Corrupt(format!("object {object_id}: hash mismatch")).into());
        }

        Ok(object_content)
    }

    fn parse_object_as_bytes(
        &self,
        object_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_content = self.load(object_type, object_id)?;
        let body_size = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let (stored_type, size) = ObjectType::parse_header(&mut object_reader)?;
        let header_size = object_reader.position() as usize;

        if stored_type != object_type || header_size + size != body_size {
            return Err(TwigError::Corrupt(format!("object {object_id}: bad header")).into());
        }

        Ok(object_reader)
    }

    pub fn parse_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(self.parse_object_as_bytes(ObjectType::Blob, object_id)?)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        Commit::deserialize(self.parse_object_as_bytes(ObjectType::Commit, object_id)?)
    }

    /// Parents of a commit, for graph traversal
    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.parse_commit(object_id)?.to_slim(object_id.clone()))
    }

    /// Load an object of whichever kind carries this ID
    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        if self.contains(ObjectType::Commit, object_id) {
            Ok(ObjectBox::Commit(Box::new(self.parse_commit(object_id)?)))
        } else {
            Ok(ObjectBox::Blob(Box::new(self.parse_blob(object_id)?)))
        }
    }

    /// Every stored commit, in object ID order
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.path.join(ObjectType::Commit.dir_name());
        let mut commits = Vec::new();

        for entry in std::fs::read_dir(&commits_path)
            .with_context(|| format!("Unable to list {}", commits_path.display()))?
        {
            let file_name = entry?.file_name();
            // skips temp files left by interrupted writes
            if let Ok(oid) = ObjectId::try_parse(file_name.to_string_lossy().to_string()) {
                commits.push(oid);
            }
        }
        commits.sort();

        Ok(commits)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
