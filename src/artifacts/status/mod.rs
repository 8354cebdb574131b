//! Working tree status
//!
//! The report compares three states of the repository: the tree HEAD points
//! to, the staging area, and the working tree.
//!
//! ## Components
//!
//! - `file_change`: Change kinds of files whose edits are not staged
//! - `status_info`: Status report assembly and display

pub mod file_change;
pub mod status_info;
