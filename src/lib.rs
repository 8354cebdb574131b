//! twig: a local, single-user version-control engine
//!
//! - `areas`: durable stores (objects, staging area, refs, working tree)
//! - `artifacts`: objects, commit graph, merge engine and other algorithms
//! - `commands`: the operations exposed by [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
