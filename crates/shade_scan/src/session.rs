//! Scan sessions
//!
//! A [`ScanSession`] owns everything that outlives a single pass: the
//! options, the compiled grammars and the [`ScanCache`]. Create one when a
//! build or watch run starts and drop it when the run ends; nothing is kept
//! in process-wide state.
//!
//! A pass runs in three steps:
//!
//! 1. stat every candidate concurrently and ask the cache which ones changed
//! 2. read and match the changed files concurrently; each task returns its
//!    own match list and touches no shared state
//! 3. after all tasks joined, fold fresh and cached matches into one
//!    [`VariableBuilder`] in candidate order, then commit the fresh entries
//!    to the cache
//!
//! Any stat or read failure fails the whole pass and leaves the cache as it
//! was.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use shade_theme::{GrammarSet, Options, ThemeMapping, TokenMatch, VariableBuilder};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ScanCache;
use crate::emit::{Emission, Emitter};
use crate::error::{Result, ScanError};
use crate::files::CandidateSource;

/// Counters for one pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Candidate files in the pass
    pub files: usize,
    /// Files read and matched this pass
    pub scanned: usize,
    /// Files served from the cache
    pub cached: usize,
    /// Theme variables produced
    pub variables: usize,
}

/// Result of one pass
#[derive(Clone, Debug)]
pub struct Pass {
    pub mapping: ThemeMapping,
    pub summary: PassSummary,
}

/// Long-lived scan state for one build or watch run
#[derive(Debug)]
pub struct ScanSession {
    options: Options,
    grammars: Arc<GrammarSet>,
    cache: ScanCache,
}

impl ScanSession {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            grammars: Arc::new(GrammarSet::new()),
            cache: ScanCache::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// Scan `paths` and build the theme mapping for this pass
    pub async fn scan(&mut self, paths: &[PathBuf]) -> Result<Pass> {
        let mtimes = join_in_order(
            paths
                .iter()
                .map(|path| tokio::spawn(stat(path.clone())))
                .collect(),
        )
        .await?;

        let mut stale = Vec::new();
        let mut reads = Vec::new();
        for (idx, (path, &mtime)) in paths.iter().zip(&mtimes).enumerate() {
            if self.cache.should_scan(path, mtime) {
                let grammars = Arc::clone(&self.grammars);
                stale.push(idx);
                reads.push(tokio::spawn(read_and_match(path.clone(), grammars)));
            } else {
                debug!(path = %path.display(), "Unchanged, replaying cached matches");
            }
        }
        let scanned = join_in_order(reads).await?;

        let mut fresh: Vec<Option<Arc<[TokenMatch]>>> = vec![None; paths.len()];
        for (idx, matches) in stale.into_iter().zip(scanned) {
            fresh[idx] = Some(matches);
        }

        let mut builder = VariableBuilder::new();
        for (path, matches) in paths.iter().zip(&fresh) {
            match matches {
                Some(matches) => builder.apply_all(matches.iter()),
                None => {
                    if let Some(entry) = self.cache.get(path) {
                        builder.apply_all(entry.matches.iter());
                    }
                }
            }
        }
        let mapping = builder.finish();

        let mut summary = PassSummary {
            files: paths.len(),
            variables: mapping.len(),
            ..PassSummary::default()
        };
        for ((path, mtime), matches) in paths.iter().zip(mtimes).zip(fresh) {
            match matches {
                Some(matches) => {
                    self.cache.record(path.clone(), mtime, matches);
                    summary.scanned += 1;
                }
                None => summary.cached += 1,
            }
        }
        self.cache.retain_paths(paths);

        info!(
            files = summary.files,
            scanned = summary.scanned,
            cached = summary.cached,
            variables = summary.variables,
            "Scan pass complete"
        );

        Ok(Pass { mapping, summary })
    }

    /// Collect candidates under `root`, scan them, and emit for `origin`
    pub async fn run(
        &mut self,
        source: &dyn CandidateSource,
        root: &Path,
        origin: &Path,
    ) -> Result<Emission> {
        let paths = source.candidates(root)?;
        if paths.is_empty() {
            info!(root = %root.display(), "No candidate files, nothing to emit");
            self.cache.clear();
            return Ok(Emission::empty());
        }

        let pass = self.scan(&paths).await?;
        Ok(Emitter::new(origin).emit(&pass.mapping, &paths))
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

async fn join_in_order<T>(handles: Vec<JoinHandle<Result<T>>>) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await??);
    }
    Ok(out)
}

async fn stat(path: PathBuf) -> Result<SystemTime> {
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(source) => return Err(ScanError::Stat { path, source }),
    };
    metadata
        .modified()
        .map_err(|source| ScanError::Stat { path, source })
}

async fn read_and_match(path: PathBuf, grammars: Arc<GrammarSet>) -> Result<Arc<[TokenMatch]>> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(ScanError::Read { path, source }),
    };
    let content = String::from_utf8_lossy(&bytes);
    let matches: Arc<[TokenMatch]> = grammars.scan(&content).into();
    debug!(path = %path.display(), matches = matches.len(), "Scanned file");
    Ok(matches)
}
