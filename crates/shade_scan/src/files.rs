//! Candidate file discovery
//!
//! The scan engine only needs a list of paths. [`CandidateSource`] is the
//! seam; [`SourceWalker`] is the default implementation, a recursive walk
//! that honors `.gitignore`/`.ignore` files and skips hidden entries.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{Result, ScanError};

/// Extensions scanned when nothing else is configured
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["ts", "tsx", "js", "jsx", "html"];

/// Produces the candidate files for one pass
pub trait CandidateSource: Send + Sync {
    /// Candidate paths under `root`, in a stable order
    fn candidates(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

impl CandidateSource for Vec<PathBuf> {
    fn candidates(&self, _root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}

/// Gitignore-aware recursive walk filtered by extension
#[derive(Clone, Debug)]
pub struct SourceWalker {
    extensions: Vec<String>,
}

impl SourceWalker {
    /// Walker for [`DEFAULT_EXTENSIONS`]
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS)
    }

    /// Walker for a custom extension list (without leading dots)
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.into().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `path` carries one of the tracked extensions
    pub fn is_tracked(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl Default for SourceWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSource for SourceWalker {
    fn candidates(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let walker = WalkBuilder::new(root)
            .standard_filters(true)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.into_path();
            if self.is_tracked(&path) {
                paths.push(path);
            }
        }

        debug!(root = %root.display(), count = paths.len(), "Collected candidate files");
        Ok(paths)
    }
}
