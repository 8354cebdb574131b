//! Ancestry and split point queries over the commit DAG
//!
//! ## Split point
//!
//! The split point of `a` and `b` is found in two passes:
//!
//! 1. Collect every ancestor of `a`, `a` included
//! 2. If `b` is one of them, `b` is the split point. Otherwise walk breadth-first
//!    from `b` and return the first commit discovered that is also an ancestor
//!    of `a`
//!
//! A commit's parents are always visited in ascending object ID order, so
//! when several common ancestors sit at the same distance from `b` the answer
//! is the same on every run. The result is the first common ancestor under
//! that order, which is not necessarily the best common ancestor of a
//! criss-cross history.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let graph = CommitGraph::new(|oid| database.load_slim_commit(oid));
//! let base = graph.split_point(&given, &head)?;
//! ```

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Read-only view of the commit DAG
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - Loads the parents of a commit by ID. Loading a commit
///   that does not exist is an error, which every query propagates.
#[derive(Debug, Clone)]
pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Parents of `oid` in traversal order (ascending object ID)
    fn ordered_parents(&self, oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut parents = (self.commit_loader)(oid)?.parents;
        parents.sort();
        parents.dedup();

        Ok(parents)
    }

    /// Every commit reachable from `start` through parent links, `start` included
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::from([start.clone()]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            for parent in self.ordered_parents(&oid)? {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        debug!(start = %start, count = visited.len(), "collected ancestors");
        Ok(visited)
    }

    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor)
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.ancestors(descendant)?.contains(ancestor))
    }

    /// Merge base of `a` and `b`
    ///
    /// # Errors
    ///
    /// `NoCommonAncestor` when the two histories never meet, which only
    /// happens in a malformed store since every history ends at the root commit.
    pub fn split_point(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<ObjectId> {
        let ancestors_of_a = self.ancestors(a)?;
        if ancestors_of_a.contains(b) {
            debug!(a = %a, b = %b, "split point is b itself");
            return Ok(b.clone());
        }

        let mut visited = HashSet::from([b.clone()]);
        let mut queue = VecDeque::from([b.clone()]);

        while let Some(oid) = queue.pop_front() {
            for parent in self.ordered_parents(&oid)? {
                if !visited.insert(parent.clone()) {
                    continue;
                }
                if ancestors_of_a.contains(&parent) {
                    debug!(a = %a, b = %b, split = %parent, "found split point");
                    return Ok(parent);
                }
                queue.push_back(parent);
            }
        }

        Err(TwigError::NoCommonAncestor(a.clone(), b.clone()).into())
    }

    /// First-parent chain from `start` back to the root, `start` first
    pub fn first_parent_history(&self, start: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut history = vec![];
        let mut next = Some(start.clone());

        while let Some(oid) = next {
            next = (self.commit_loader)(&oid)?.parents.into_iter().next();
            history.push(oid);
        }

        Ok(history)
    }
}
