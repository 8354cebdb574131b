use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use derive_new::new;

/// One commit as printed by `log`, `global-log`
///
/// ```text
/// ===
/// commit 3e8bf1d7...
/// Merge: 4975af1 2c1ead1
/// Date: Thu Nov 9 20:00:05 2017 -0800
/// Merged development into master.
///
/// ```
///
/// The `Merge:` line only appears for merge commits.
#[derive(Debug, new)]
pub struct LogEntry<'c> {
    oid: &'c ObjectId,
    commit: &'c Commit,
}

impl std::fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "{}", format!("commit {}", self.oid).yellow())?;

        if let (Some(parent), Some(merge_parent)) =
            (self.commit.parent(), self.commit.merge_parent())
        {
            writeln!(
                f,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }

        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
