use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::TwigError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at HEAD; the active branch does not change
    pub fn create_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let head = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head)?;

        Ok(())
    }

    /// Remove a branch ref; commits it pointed to stay in the store
    pub fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| TwigError::MissingBranch(name.to_string()))?;

        if self.refs().read_branch(&branch_name)?.is_none() {
            return Err(TwigError::MissingBranch(name.to_string()).into());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::RemoveCurrentBranch(name.to_string()).into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;
        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(())
    }
}
