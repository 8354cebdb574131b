//! Commit graph queries
//!
//! Commits only reference their parents by ID, so the graph is never held in
//! memory as linked nodes: every edge is a lookup through a commit loader.

pub mod commit_graph;
