//! Shade Scan Engine
//!
//! Finds the color utilities used across a project and turns them into a
//! `@theme inline` block, re-reading only the files that changed since the
//! previous pass.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shade_scan::{ScanSession, SourceWalker};
//! use shade_theme::Options;
//!
//! let mut session = ScanSession::new(Options::default());
//! let emission = session
//!     .run(&SourceWalker::new(), Path::new("."), Path::new("src/app.css"))
//!     .await?;
//!
//! let css = emission.apply(&std::fs::read_to_string("src/app.css")?);
//! ```
//!
//! Keep the same [`ScanSession`] across passes in watch mode: its cache is
//! what makes later passes cheap.

mod cache;
mod emit;
mod error;
mod files;
mod session;

pub use cache::{CacheEntry, ScanCache};
pub use emit::{
    Declaration, DependencyMessage, Emission, Emitter, MessageKind, ThemeBlock, PLUGIN_NAME,
};
pub use error::{Result, ScanError};
pub use files::{CandidateSource, SourceWalker, DEFAULT_EXTENSIONS};
pub use session::{Pass, PassSummary, ScanSession};
