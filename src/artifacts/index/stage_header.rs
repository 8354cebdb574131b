use crate::artifacts::core::error::TwigError;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StageHeader {
    pub marker: String,
    pub version: u32,
    pub added_count: u32,
    pub removed_count: u32,
}

impl StageHeader {
    pub fn for_counts(added_count: usize, removed_count: usize) -> anyhow::Result<Self> {
        Ok(StageHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            added_count: u32::try_from(added_count)?,
            removed_count: u32::try_from(removed_count)?,
        })
    }

    /// Reject anything that is not a version we can read
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.marker != SIGNATURE {
            return Err(TwigError::Corrupt("staging area: invalid signature".into()).into());
        }

        if self.version != VERSION {
            return Err(TwigError::Corrupt(format!(
                "staging area: unsupported version {}",
                self.version
            ))
            .into());
        }

        Ok(())
    }
}

impl Packable for StageHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.added_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removed_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StageHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut bytes)
            .map_err(|_| TwigError::Corrupt("staging area: truncated header".into()))?;

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| TwigError::Corrupt("staging area: invalid signature".into()))?;
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        let added_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);
        let removed_count = byteorder::NetworkEndian::read_u32(&bytes[12..16]);

        Ok(StageHeader {
            marker,
            version,
            added_count,
            removed_count,
        })
    }
}
