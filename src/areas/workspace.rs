use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::WorkingFiles;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".twig", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path as typed by the user, relative to the working tree root
    ///
    /// # Errors
    ///
    /// `FileNotFound` when the path leads outside the working tree.
    pub fn relative_path(&self, raw: &str) -> anyhow::Result<PathBuf> {
        let path = Path::new(raw);
        let path = path.strip_prefix(&self.path).unwrap_or(path);
        let outside = || TwigError::FileNotFound(PathBuf::from(raw));

        let mut relative_path = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => relative_path.push(name),
                Component::ParentDir => {
                    if !relative_path.pop() {
                        return Err(outside().into());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside().into()),
            }
        }

        Ok(relative_path)
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        Ok(Blob::new(data))
    }

    /// Every file of the working tree, relative to its root, in path order
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| {
                let relative_path = entry.path().strip_prefix(&self.path).unwrap_or(entry.path());
                !Self::is_ignored(relative_path)
            })
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Files below `dir`, relative to the working tree root, in path order
    pub fn list_files_in(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(self.path.join(dir)) {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", dir))?;
            if let Some(relative_path) = self.check_if_not_ignored_file_path(entry.path()) {
                files.push(relative_path);
            }
        }
        files.sort();

        Ok(files)
    }

    /// Every file of the working tree with the blob ID of its content
    pub fn hash_files(&self) -> anyhow::Result<WorkingFiles> {
        self.list_files()?
            .into_iter()
            .map(|path| {
                let oid = self.parse_blob(&path)?.object_id()?;
                Ok::<_, anyhow::Error>((path, oid))
            })
            .collect()
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;

        if path.is_file() && !Self::is_ignored(relative_path) {
            Some(relative_path.to_path_buf())
        } else {
            None
        }
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Write `data` to `file_path`, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.make_directory(parent)?;
        }

        // only an empty directory may give way to the file
        if full_path.is_dir() {
            if full_path.read_dir()?.next().is_some() {
                return Err(
                    TwigError::UntrackedFileInTheWay(format!("\t{}", file_path.display())).into(),
                );
            }
            std::fs::remove_dir(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        std::fs::write(&full_path, data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete `file_path` if present, then prune parent directories left empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent.filter(|p| !p.as_os_str().is_empty()) {
            let full_dir = self.path.join(dir);
            if !full_dir.is_dir() || full_dir.read_dir()?.next().is_some() {
                break;
            }
            std::fs::remove_dir(&full_dir)
                .with_context(|| format!("Failed to remove directory: {:?}", dir))?;
            parent = dir.parent();
        }

        Ok(())
    }

    // The order of applying migrations is important: deletions go first so
    // that a removed file never blocks a directory the target tree needs.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        blob_loader: impl Fn(&ObjectId) -> anyhow::Result<Bytes>,
    ) -> anyhow::Result<()> {
        for path in migration.deletions() {
            debug!(path = %path.display(), "deleting");
            self.remove_file(path)?;
        }

        for (path, oid) in migration.writes() {
            debug!(path = %path.display(), oid = %oid, "writing");
            self.write_file(path, &blob_loader(oid)?)?;
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(dir_path);

        if full_path.is_dir() {
            return Ok(());
        }

        // a file standing where a directory is needed
        if let Some(blocking) = dir_path
            .ancestors()
            .take_while(|ancestor| !ancestor.as_os_str().is_empty())
            .find(|ancestor| self.path.join(ancestor).is_file())
        {
            std::fs::remove_file(self.path.join(blocking))
                .with_context(|| format!("Failed to remove file: {:?}", blocking))?;
        }

        std::fs::create_dir_all(&full_path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))
    }
}
