//! Repository operations
//!
//! Each command is an `impl Repository` block in its own file:
//!
//! - `plumbing`: direct object access (hash-object, cat-file)
//! - `porcelain`: the version-control workflow (add, commit, merge, log, ...)

pub mod plumbing;
pub mod porcelain;
