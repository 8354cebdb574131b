//! Staging area entry
//!
//! One staged addition or removal: the path and the blob ID it refers to.
//! For removals the blob ID is the one HEAD tracks, which keeps the entry
//! self-describing even though folding only needs the path.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Size of the fixed part of an entry: object ID and path length
pub const ENTRY_PREFIX_SIZE: usize = 22;

/// Maximum path length an entry can record
const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StageEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl StageEntry {
    /// Length of the path recorded in an entry's fixed prefix
    pub fn path_len(prefix: &[u8]) -> anyhow::Result<usize> {
        if prefix.len() < ENTRY_PREFIX_SIZE {
            return Err(TwigError::Corrupt("staging area: truncated entry".into()).into());
        }

        Ok(byteorder::NetworkEndian::read_u16(&prefix[20..ENTRY_PREFIX_SIZE]) as usize)
    }
}

impl Packable for StageEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Non UTF-8 path: {}", self.path.display()))?;
        if path.len() > MAX_PATH_SIZE {
            return Err(anyhow::anyhow!("Path too long to stage: {}", path));
        }

        let mut bytes = Vec::with_capacity(ENTRY_PREFIX_SIZE + path.len());
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StageEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut prefix = [0u8; ENTRY_PREFIX_SIZE];
        reader
            .read_exact(&mut prefix)
            .map_err(|_| TwigError::Corrupt("staging area: truncated entry".into()))?;

        let oid = ObjectId::read_h40_from(&mut &prefix[..20])?;
        let mut path = vec![0u8; Self::path_len(&prefix)?];
        reader
            .read_exact(&mut path)
            .map_err(|_| TwigError::Corrupt("staging area: truncated entry path".into()))?;

        let path = String::from_utf8(path)
            .map_err(|_| TwigError::Corrupt("staging area: non UTF-8 path".into()))?;
        if path.is_empty() {
            return Err(TwigError::Corrupt("staging area: empty path".into()).into());
        }

        Ok(StageEntry {
            path: PathBuf::from(path),
            oid,
        })
    }
}
