//! Checkout operations and conflict handling
//!
//! This module handles moving the working tree from one commit's tree to
//! another by:
//! - Computing which paths to write and which to delete
//! - Detecting untracked files the move would destroy
//!
//! Conflicts are detected before any change is made to the working tree.

pub mod conflict;
pub mod migration;
