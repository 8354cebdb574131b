use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.metadata_path().exists() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        self.database()
            .init()
            .context("Failed to create .twig/objects directories")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let root_oid = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::default_branch();
        self.refs().update_branch(&default_branch, &root_oid)?;
        self.refs().update_head(&root_oid)?;
        self.refs().set_current_branch(&default_branch)?;

        self.index()
            .write_updates()
            .context("Failed to create .twig/index file")?;

        info!(path = %self.path().display(), root = %root_oid, "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
