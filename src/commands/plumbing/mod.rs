//! Plumbing commands
//!
//! - `hash-object`: compute a file's blob ID and optionally store the blob
//! - `cat-file`: print a stored object

pub mod cat_file;
pub mod hash_object;
