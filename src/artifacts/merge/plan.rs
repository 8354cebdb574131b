use crate::artifacts::merge::classifier::{PathState, Resolution};
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::debug;

/// A path the merge has to touch, with the blobs involved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the given commit's blob and stage it
    TakeGiven(ObjectId),
    /// Delete the path; the blob is what the current head tracked
    Remove(ObjectId),
    /// Write a conflict block built from whichever sides still have the path
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Every non-trivial outcome of merging `given` into `current`, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<PathBuf, MergeAction>,
}

impl MergePlan {
    pub fn new(split: &Tree, current: &Tree, given: &Tree) -> Self {
        let paths = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect::<BTreeSet<_>>();

        let mut actions = BTreeMap::new();
        for path in paths {
            let (split_oid, current_oid, given_oid) =
                (split.get(path), current.get(path), given.get(path));
            let state = PathState::classify(split_oid, current_oid, given_oid);
            let resolution = state.resolve();
            debug!(path = %path.display(), ?state, ?resolution, "classified path");

            let action = match (resolution, current_oid, given_oid) {
                (Resolution::Keep, _, _) => continue,
                (Resolution::TakeGiven, _, Some(oid)) => MergeAction::TakeGiven(oid.clone()),
                (Resolution::Remove, Some(oid), _) => MergeAction::Remove(oid.clone()),
                (Resolution::Conflict, current, given) => MergeAction::Conflict {
                    current: current.cloned(),
                    given: given.cloned(),
                },
                // unreachable: taking or removing requires the side to exist
                (Resolution::TakeGiven | Resolution::Remove, _, _) => continue,
            };
            actions.insert(path.clone(), action);
        }

        MergePlan { actions }
    }

    pub fn actions(&self) -> impl Iterator<Item = (&PathBuf, &MergeAction)> {
        self.actions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        self.actions
            .values()
            .any(|action| matches!(action, MergeAction::Conflict { .. }))
    }
}
