//! Per-file modification-time memo
//!
//! An entry remembers when a file was last scanned and which tokens it held
//! at that time. A file whose observed mtime equals the stored one is not
//! read again; its remembered matches are replayed into the pass instead, so
//! the theme never loses variables that only unchanged files contribute.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use rustc_hash::{FxHashMap, FxHashSet};
use shade_theme::TokenMatch;

/// What the cache knows about one file
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Modification time observed when the file was scanned
    pub mtime: SystemTime,
    /// Token matches extracted at that time, in grammar order
    pub matches: Arc<[TokenMatch]>,
}

/// Scan cache keyed by path
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: FxHashMap<PathBuf, CacheEntry>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` must be (re)read given its current `mtime`
    pub fn should_scan(&self, path: &Path, mtime: SystemTime) -> bool {
        self.entries
            .get(path)
            .map_or(true, |entry| entry.mtime != mtime)
    }

    /// Remember a successful scan
    pub fn record(&mut self, path: PathBuf, mtime: SystemTime, matches: Arc<[TokenMatch]>) {
        self.entries.insert(path, CacheEntry { mtime, matches });
    }

    pub fn get(&self, path: &Path) -> Option<&CacheEntry> {
        self.entries.get(path)
    }

    /// Drop entries for files that are no longer candidates
    pub fn retain_paths(&mut self, paths: &[PathBuf]) {
        let keep: FxHashSet<&Path> = paths.iter().map(PathBuf::as_path).collect();
        self.entries.retain(|path, _| keep.contains(path.as_path()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
