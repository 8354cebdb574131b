use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::CommitPrefix;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::{Commit, SlimCommit, Tree};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory at the repository root
pub const METADATA_DIR: &str = ".twig";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Lay out a repository rooted at `path` without touching the disk beyond
    /// creating `path` itself; `init` populates the metadata directory
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }

        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an existing repository
    ///
    /// # Errors
    ///
    /// `NotInitialized` when `path` has no metadata directory.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !Path::new(path).join(METADATA_DIR).is_dir() {
            return Err(TwigError::NotInitialized.into());
        }

        Self::new(path, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// The staging area; callers rehydrate it before use and write it back
    /// after a successful mutation
    pub(crate) fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub(crate) fn database(&self) -> &Database {
        &self.database
    }

    pub(crate) fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub(crate) fn refs(&self) -> &Refs {
        &self.refs
    }

    pub(crate) fn graph(
        &self,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
        CommitGraph::new(|oid: &ObjectId| self.database.load_slim_commit(oid))
    }

    /// Resolve a full or abbreviated commit ID against every stored commit
    pub fn resolve_commit(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        CommitPrefix::try_parse(prefix)?.resolve(self.database.list_commits()?)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.parse_commit(oid)
    }

    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head = self.refs.read_head()?;
        let commit = self.load_commit(&head)?;

        Ok((head, commit))
    }

    /// First-parent history from `start` back to the root commit
    pub fn history(&self, start: &ObjectId) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        self.graph()
            .first_parent_history(start)?
            .into_iter()
            .map(|oid| {
                let commit = self.load_commit(&oid)?;
                Ok::<_, anyhow::Error>((oid, commit))
            })
            .collect()
    }

    pub fn tracked_files(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        Ok(self.load_commit(oid)?.into_tree())
    }

    pub fn staged_files(&self) -> anyhow::Result<Tree> {
        let mut index = self.index();
        index.rehydrate()?;

        Ok(index.added().clone())
    }

    pub fn removed_files(&self) -> anyhow::Result<Tree> {
        let mut index = self.index();
        index.rehydrate()?;

        Ok(index.removed().clone())
    }
}
