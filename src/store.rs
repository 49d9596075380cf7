//! Model file store: directory listing and filename resolution.
//!
//! The store is a read-only view over a single directory. Listings are
//! recomputed on every call so they always reflect the current filesystem
//! state; nothing is cached.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// Outcome of resolving a model name against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The name maps to an existing regular file inside the store.
    Found(PathBuf),
    /// No such model. Names that are not a plain single path segment
    /// resolve here without touching the filesystem.
    NotFound,
}

/// Read-only view over a directory of model files.
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
    extension: String,
}

impl ModelStore {
    /// Create a store over `root`, serving files ending in `extension`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Directory this store serves from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate model files directly under the store root.
    ///
    /// Only regular files whose name ends with the configured extension are
    /// returned, in whatever order the directory enumeration yields them.
    /// Subdirectories are never descended into.
    pub fn list(&self) -> std::result::Result<Vec<String>, StoreError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::DirectoryNotFound(self.root.display().to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        let mut models = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(&self.extension) {
                models.push(name.to_string());
            }
        }

        debug!(count = models.len(), root = %self.root.display(), "Listed models");
        Ok(models)
    }

    /// Resolve a requested model name to a path inside the store.
    ///
    /// The name must be a single plain path segment: anything containing a
    /// separator or a `.`/`..` component is rejected before the filesystem
    /// is consulted, so a crafted name can never escape the store root.
    pub fn resolve(&self, name: &str) -> Resolved {
        if !is_single_segment(name) {
            debug!(%name, "Rejected unsafe model name");
            return Resolved::NotFound;
        }

        let path = self.root.join(name);
        match path.metadata() {
            Ok(meta) if meta.is_file() => Resolved::Found(path),
            _ => Resolved::NotFound,
        }
    }
}

/// True when `name` parses as exactly one normal path component.
fn is_single_segment(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
