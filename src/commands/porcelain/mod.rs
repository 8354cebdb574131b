//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: create the metadata directory and the root commit
//! - `add`, `rm`: stage additions and removals
//! - `commit`: fold the staging area onto HEAD
//! - `checkout`: restore a file, or switch branches
//! - `branch`: create or delete branches
//! - `reset`: move the current branch to any commit
//! - `merge`: three-way merge of another branch
//! - `log`, `find`: browse history
//! - `status`: staging area and working tree report

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
