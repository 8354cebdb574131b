use crate::artifacts::objects::object_id::ObjectId;

/// How one side treated a path that the split point tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Unchanged,
    Modified,
    Removed,
}

impl Change {
    fn between(base: &ObjectId, side: Option<&ObjectId>) -> Self {
        match side {
            None => Change::Removed,
            Some(oid) if oid == base => Change::Unchanged,
            Some(_) => Change::Modified,
        }
    }
}

/// Where a path stands across the split point, current head and given commit
///
/// `sides_match` is true when current and given hold the same blob, or both
/// lack the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathState {
    /// The split point tracks the path
    Based {
        current: Change,
        given: Change,
        sides_match: bool,
    },
    /// The path is new since the split point; the flags say which sides have it
    Unbased {
        current: bool,
        given: bool,
        sides_match: bool,
    },
}

/// What the merge does to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Leave the current head's version (or absence) alone
    Keep,
    /// Check out the given commit's blob and stage it
    TakeGiven,
    /// Delete the path and stage the removal
    Remove,
    /// Write both sides between conflict markers and stage the result
    Conflict,
}

impl PathState {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Self {
        let sides_match = current == given;

        match split {
            Some(base) => PathState::Based {
                current: Change::between(base, current),
                given: Change::between(base, given),
                sides_match,
            },
            None => PathState::Unbased {
                current: current.is_some(),
                given: given.is_some(),
                sides_match,
            },
        }
    }

    pub fn resolve(&self) -> Resolution {
        use Change::*;

        match *self {
            PathState::Based {
                current: Unchanged,
                given: Unchanged,
                ..
            } => Resolution::Keep,
            PathState::Based {
                current: Unchanged,
                given: Modified,
                ..
            } => Resolution::TakeGiven,
            PathState::Based {
                current: Unchanged,
                given: Removed,
                ..
            } => Resolution::Remove,
            PathState::Based {
                current: Modified | Removed,
                given: Unchanged,
                ..
            } => Resolution::Keep,
            PathState::Based {
                current: Modified,
                given: Modified,
                sides_match: true,
            } => Resolution::Keep,
            PathState::Based {
                current: Modified,
                given: Modified,
                sides_match: false,
            } => Resolution::Conflict,
            PathState::Based {
                current: Modified,
                given: Removed,
                ..
            }
            | PathState::Based {
                current: Removed,
                given: Modified,
                ..
            } => Resolution::Conflict,
            PathState::Based {
                current: Removed,
                given: Removed,
                ..
            } => Resolution::Keep,
            PathState::Unbased {
                current: false,
                given: true,
                ..
            } => Resolution::TakeGiven,
            PathState::Unbased { given: false, .. } => Resolution::Keep,
            PathState::Unbased {
                current: true,
                given: true,
                sides_match: true,
            } => Resolution::Keep,
            PathState::Unbased {
                current: true,
                given: true,
                sides_match: false,
            } => Resolution::Conflict,
        }
    }
}
