//! Commit object
//!
//! Commits are immutable snapshots. Each one records:
//! - Up to two parents (the first is absent only for the root commit, the
//!   second is present only for merge commits)
//! - A timestamp (the root commit always uses the Unix epoch)
//! - The full tracked tree as an ordered path → blob ID map
//! - A message
//!
//! The commit ID is the hash of all of the above, so identical fields always
//! produce the identical commit, across repositories.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <first-parent-oid>
//! parent <merge-parent-oid>
//! timestamp <unix-seconds> <+hhmm>
//! entry <blob-oid> <path>
//! entry <blob-oid> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable that pins the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Tracked snapshot: path → blob ID, in path order
pub type Tree = BTreeMap<PathBuf, ObjectId>;

/// Slim representation of a commit
///
/// Only what graph traversal needs: the commit's own ID and its parents.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// First parent, then merge parent (when present)
    pub parents: Vec<ObjectId>,
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// First parent; `None` only for the root commit
    parent: Option<ObjectId>,
    /// Second parent; `Some` only for merge commits
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    tree: Tree,
    message: String,
}

impl Commit {
    /// Create a non-root commit
    ///
    /// # Arguments
    ///
    /// * `parent` - The commit HEAD pointed to
    /// * `merge_parent` - The given branch's tip, for merge commits
    /// * `tree` - The folded snapshot
    /// * `message` - Commit message
    /// * `timestamp` - Commit time
    pub fn new(
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
        tree: Tree,
        message: String,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            parent: Some(parent),
            merge_parent,
            timestamp,
            tree,
            message,
        }
    }

    /// The root commit: no parents, empty tree, epoch timestamp
    pub fn root() -> Self {
        Commit {
            parent: None,
            merge_parent: None,
            timestamp: epoch(),
            tree: Tree::new(),
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    /// Timestamp for a new commit: `TWIG_COMMIT_DATE` when set, otherwise now
    ///
    /// Accepts `%Y-%m-%d %H:%M:%S %z` or RFC 2822.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                .or_else(|_| DateTime::parse_from_rfc2822(&date_str))
                .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Parents in slot order: first parent, then merge parent
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.merge_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Blob ID tracked for `path`, if any
    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents().cloned().collect(),
        }
    }

    fn body(&self) -> anyhow::Result<String> {
        let mut lines = vec![];

        for parent in self.parents() {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.tree {
            let path = path
                .to_str()
                .filter(|path| !path.contains('\n'))
                .with_context(|| format!("path {} cannot be recorded", path.display()))?;
            lines.push(format!("entry {} {}", oid, path));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(lines.join("\n"))
    }
}

fn epoch() -> DateTime<FixedOffset> {
    DateTime::UNIX_EPOCH.fixed_offset()
}

fn parse_offset(offset: &str) -> anyhow::Result<FixedOffset> {
    let corrupt = || TwigError::Corrupt(format!("commit timestamp offset {offset:?}"));

    let (sign, digits) = match offset.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(corrupt().into()),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(corrupt().into());
    }

    let hours = digits[..2].parse::<i32>()?;
    let minutes = digits[2..].parse::<i32>()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(|| corrupt().into())
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = value
        .split_once(' ')
        .ok_or_else(|| TwigError::Corrupt(format!("commit timestamp {value:?}")))?;
    let seconds = seconds
        .parse::<i64>()
        .map_err(|_| TwigError::Corrupt(format!("commit timestamp {value:?}")))?;
    let offset = parse_offset(offset)?;

    offset
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| TwigError::Corrupt(format!("commit timestamp {value:?}")).into())
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self.object_type(), self.body()?.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .ok_or_else(|| TwigError::Corrupt("commit object: missing message".into()))?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tree = Tree::new();

        for line in header.split('\n') {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| TwigError::Corrupt(format!("commit object line {line:?}")))?;

            match key {
                "parent" if timestamp.is_none() => {
                    parents.push(ObjectId::try_parse(value.to_string())?);
                }
                "timestamp" => timestamp = Some(parse_timestamp(value)?),
                "entry" => {
                    let (oid, path) = value.split_once(' ').ok_or_else(|| {
                        TwigError::Corrupt(format!("commit object entry {value:?}"))
                    })?;
                    tree.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => {
                    return Err(TwigError::Corrupt(format!("commit object line {line:?}")).into());
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| TwigError::Corrupt("commit object: missing timestamp".into()))?;

        let mut parents = parents.into_iter();
        let commit = Commit {
            parent: parents.next(),
            merge_parent: parents.next(),
            timestamp,
            tree,
            message: message.to_string(),
        };

        if parents.next().is_some() {
            return Err(TwigError::Corrupt("commit object: more than two parents".into()).into());
        }

        Ok(commit)
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body().unwrap_or_else(|_| self.message.clone())
    }
}
