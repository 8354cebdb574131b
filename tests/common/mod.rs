#![allow(dead_code)]


/// Timestamp every test commit is recorded with (`%Y-%m-%d %H:%M:%S %z`)
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// Message of the root commit every repository starts with
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";
