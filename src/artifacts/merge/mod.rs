//! Three-way merge
//!
//! Every path tracked by the split point, the current head or the given
//! commit is classified by how each side moved away from the split point
//! ([`classifier`]). The classifications are collected into a [`plan::MergePlan`]
//! that lists only the paths the merge must touch; conflicting paths get
//! their contents rendered with [`conflict::render`].

pub mod classifier;
pub mod conflict;
pub mod plan;
