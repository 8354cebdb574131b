use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// IDs of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        for oid in self.database().list_commits()? {
            if self.load_commit(&oid)?.message() == message {
                matches.push(oid);
            }
        }

        if matches.is_empty() {
            return Err(TwigError::NoMatchingCommit(message.to_string()).into());
        }

        for oid in &matches {
            writeln!(self.writer(), "{}", oid)?;
        }

        Ok(matches)
    }
}
