//! Shade Theme Core
//!
//! Synthesizes CSS custom properties for color intensities that fall between
//! the stock palette stops, driven by the color utilities found in source
//! text.
//!
//! # Overview
//!
//! - [`palette`]: the stop ladder and the interpolator
//! - [`grammar`]: the four utility-token grammars, in precedence order
//! - [`builder`]: folds token matches into a [`ThemeMapping`]
//! - [`options`]: session options
//!
//! # Quick Start
//!
//! ```rust
//! use shade_theme::{GrammarSet, VariableBuilder};
//!
//! let grammars = GrammarSet::new();
//! let mut builder = VariableBuilder::new();
//! builder.apply_all(&grammars.scan(r#"<p class="text-blue-150">"#));
//!
//! let mapping = builder.finish();
//! assert_eq!(
//!     mapping.get("--color-blue-150"),
//!     Some("color-mix(in oklab, var(--color-blue-100) 50%, var(--color-blue-200))")
//! );
//! ```
//!
//! No file IO happens here; see the `shade_scan` crate for discovery,
//! caching and emission.

pub mod builder;
pub mod grammar;
pub mod options;
pub mod palette;

pub use builder::{ThemeMapping, VariableBuilder};
pub use grammar::{GrammarSet, Token, TokenKind, TokenMatch, TokenRule};
pub use options::Options;
pub use palette::{bracket, is_stop, synthesize, Band, Intensity, STOPS};
