use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::UntrackedGuard;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::merge::conflict;
use crate::artifacts::merge::plan::{MergeAction, MergePlan};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// What `merge` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch was moved to the given tip; no commit was created
    FastForwarded,
    /// The given tip is already part of the current history
    NoOp,
    /// A merge commit was recorded
    Completed { had_conflicts: bool },
}

impl Repository {
    /// Merge the tip of branch `name` into the current branch
    ///
    /// Conflicting paths are written with conflict markers and committed as
    /// they are; the merge still completes.
    pub fn merge(&mut self, name: &str) -> anyhow::Result<MergeOutcome> {
        {
            let mut index = self.index();
            index.rehydrate()?;
            if !index.is_empty() {
                return Err(TwigError::UncommittedChanges.into());
            }
        }

        let given_name = BranchName::try_parse(name.to_string())
            .map_err(|_| TwigError::MissingBranch(name.to_string()))?;
        let given_id = self
            .refs()
            .read_branch(&given_name)?
            .ok_or_else(|| TwigError::MissingBranch(name.to_string()))?;

        let current_name = self.refs().current_branch()?;
        if current_name == given_name {
            return Err(TwigError::MergeWithSelf(name.to_string()).into());
        }

        let (head_id, head) = self.head_commit()?;
        let given = self.load_commit(&given_id)?;

        let graph = self.graph();
        let split_id = graph.split_point(&given_id, &head_id)?;
        info!(head = %head_id, given = %given_id, split = %split_id, "found split point");

        if split_id == head_id || graph.is_ancestor(&head_id, &given_id)? {
            self.migrate_working_tree(head.tree(), given.tree())?;
            self.refs().update_branch(&current_name, &given_id)?;
            self.refs().update_head(&given_id)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded);
        }

        if split_id == given_id || graph.is_ancestor(&given_id, &head_id)? {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::NoOp);
        }

        let split = self.load_commit(&split_id)?;
        let plan = MergePlan::new(split.tree(), head.tree(), given.tree());
        let (writes, removals) = self.materialize_plan(&plan)?;

        let incoming = writes
            .iter()
            .map(|(path, blob)| Ok::<_, anyhow::Error>((path.clone(), blob.object_id()?)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        UntrackedGuard::new(self.workspace(), head.tree())
            .check(incoming.iter().map(|(path, oid)| (path.as_path(), oid)))?;

        {
            let mut index = self.index();

            // removals first, so a directory emptied by them can turn into a file
            for (path, prior_id) in removals {
                self.workspace().remove_file(&path)?;
                index.record_remove(path, prior_id);
            }
            for (path, blob) in writes {
                let blob_id = self.database().store(&blob)?;
                self.workspace().write_file(&path, blob.content())?;
                index.record_add(path, blob_id);
            }

            index.write_updates()?;
        }

        let had_conflicts = plan.has_conflicts();
        let message = format!("Merged {} into {}.", given_name, current_name);
        let merge_id = self.write_commit(&message, Some(given_id))?;
        info!(oid = %merge_id, had_conflicts, "recorded merge commit");

        if had_conflicts {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Completed { had_conflicts })
    }

    /// Contents to write and paths to delete for each planned action
    #[allow(clippy::type_complexity)]
    fn materialize_plan(
        &self,
        plan: &MergePlan,
    ) -> anyhow::Result<(Vec<(PathBuf, Blob)>, Vec<(PathBuf, ObjectId)>)> {
        let mut writes = Vec::new();
        let mut removals = Vec::new();

        for (path, action) in plan.actions() {
            match action {
                MergeAction::TakeGiven(oid) => {
                    writes.push((path.clone(), self.database().parse_blob(oid)?));
                }
                MergeAction::Remove(oid) => {
                    removals.push((path.clone(), oid.clone()));
                }
                MergeAction::Conflict { current, given } => {
                    info!(path = %path.display(), "merge conflict");

                    let current = current
                        .as_ref()
                        .map(|oid| self.database().parse_blob(oid))
                        .transpose()?;
                    let given = given
                        .as_ref()
                        .map(|oid| self.database().parse_blob(oid))
                        .transpose()?;

                    let merged = conflict::render(
                        current.as_ref().map(|blob| blob.content().as_ref()),
                        given.as_ref().map(|blob| blob.content().as_ref()),
                    );
                    writes.push((path.clone(), Blob::new(merged)));
                }
            }
        }

        Ok((writes, removals))
    }
}
