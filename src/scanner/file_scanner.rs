//! Lazy recursive discovery of candidate files

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// A regular file found under the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    path: PathBuf,
    extension: String,
}

impl FileCandidate {
    /// Build a candidate, lowercasing the extension. Files without an
    /// extension get an empty one and are skipped by the registry.
    pub fn new(path: PathBuf) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self { path, extension }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase extension without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// A directory (or entry) that could not be read during the walk.
///
/// Never fatal: the subtree below `path` is skipped and the walk goes on.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct WalkError {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
}

impl WalkError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(source: walkdir::Error) -> Self {
        let path = source.path().map(Path::to_path_buf).unwrap_or_default();
        Self { path, source }
    }
}

/// Iterator over every regular file below a root.
///
/// Hidden directories are included and symlinks are not followed. Entries
/// are produced one at a time so memory grows with directory depth only.
pub struct Walk {
    inner: walkdir::IntoIter,
}

impl Iterator for Walk {
    type Item = Result<FileCandidate, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        return Some(Ok(FileCandidate::new(entry.into_path())));
                    }
                }
                Err(e) => return Some(Err(WalkError::from(e))),
            }
        }
    }
}

/// Start walking `root` recursively
pub fn walk(root: &Path) -> Walk {
    Walk {
        inner: WalkDir::new(root).follow_links(false).into_iter(),
    }
}
