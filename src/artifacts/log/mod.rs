//! Commit history display
//!
//! `log` walks first parents from HEAD; `global-log` lists every stored
//! commit in object ID order. Both print each commit as a [`log_entry::LogEntry`].

pub mod log_entry;
