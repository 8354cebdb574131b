//! Durable repository stores
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area persisted between invocations
//! - `refs`: branches, HEAD and the active branch
//! - `repository`: aggregate owning the stores and the output writer
//! - `workspace`: working tree file system operations

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
