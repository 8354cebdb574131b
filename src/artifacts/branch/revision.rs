//! Commit ID resolution
//!
//! Commands that take a commit ID accept any unambiguous prefix of one, the
//! full 40-digit form included. Upper-case digits are accepted.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;

/// A possibly abbreviated commit ID, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPrefix(String);

impl CommitPrefix {
    /// Anything that cannot prefix an object ID names no commit
    pub fn try_parse(prefix: &str) -> anyhow::Result<Self> {
        let prefix = prefix.trim();

        if prefix.is_empty()
            || prefix.len() > OBJECT_ID_LENGTH
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(TwigError::UnknownCommit(prefix.to_string()).into());
        }

        Ok(Self(prefix.to_ascii_lowercase()))
    }

    /// Pick the single candidate this prefix names
    ///
    /// # Errors
    ///
    /// `UnknownCommit` when nothing matches, `AmbiguousCommit` when several do.
    pub fn resolve(&self, candidates: impl IntoIterator<Item = ObjectId>) -> anyhow::Result<ObjectId> {
        let mut matches = candidates
            .into_iter()
            .filter(|oid| oid.has_prefix(&self.0))
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Err(TwigError::UnknownCommit(self.0.clone()).into()),
            1 => Ok(matches.remove(0)),
            candidates => Err(TwigError::AmbiguousCommit {
                prefix: self.0.clone(),
                candidates,
            }
            .into()),
        }
    }
}

impl AsRef<str> for CommitPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
