//! Version-control data structures and algorithms
//!
//! - `branch`: Branch names and commit-id resolution
//! - `checkout`: Tree-to-tree working tree migration and the untracked-file guard
//! - `core`: Typed errors and the pager writer
//! - `graph`: Commit DAG traversal (ancestors, split point, first-parent history)
//! - `index`: On-disk codec of the staging area
//! - `log`: History entry formatting
//! - `merge`: Three-way merge classification and conflict markers
//! - `objects`: Object types (blob, commit) and their identifiers
//! - `status`: Working tree status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
