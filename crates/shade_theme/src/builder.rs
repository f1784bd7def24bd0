//! Theme variable accumulation
//!
//! [`VariableBuilder`] folds grammar matches into a [`ThemeMapping`] while
//! enforcing three rules:
//!
//! - a variable name is written once; later writes are ignored
//! - base colors at stock stops are never synthesized
//! - a literal token is processed once per pass, whichever grammar saw it first

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::grammar::{Token, TokenMatch};
use crate::palette::{color_var, is_stop, synthesize, Intensity};

/// Insertion-ordered `--custom-property` → value table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeMapping {
    entries: IndexMap<String, String>,
}

impl ThemeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variables in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert unless `name` is already present. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, name: String, value: String) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, value);
        true
    }
}

impl<'a> IntoIterator for &'a ThemeMapping {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accumulates theme variables for one pass
#[derive(Debug, Default)]
pub struct VariableBuilder {
    mapping: ThemeMapping,
    parsed: FxHashSet<String>,
}

impl VariableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one grammar match.
    ///
    /// Returns `false` if the literal was already processed this pass.
    pub fn apply(&mut self, m: &TokenMatch) -> bool {
        if self.parsed.contains(&m.literal) {
            trace!(literal = %m.literal, "Token already parsed this pass");
            return false;
        }

        match &m.token {
            Token::Plain { family, intensity } => {
                self.add_color(family, intensity.value());
            }
            Token::Light { family, intensity } => {
                self.add_variant("light", family, intensity, "var(--color-white)");
            }
            Token::Dark { family, intensity } => {
                self.add_variant("dark", family, intensity, "var(--color-black)");
            }
            Token::Mix {
                first,
                second,
                intensity,
            } => {
                self.mapping.insert_if_absent(
                    format!("--color-{}-{}-{}", first, second, intensity),
                    format!(
                        "color-mix(in oklab, {} 50%, {})",
                        color_var(first, intensity),
                        color_var(second, intensity)
                    ),
                );
                self.add_color(first, intensity.value());
                self.add_color(second, intensity.value());
            }
        }

        self.parsed.insert(m.literal.clone());
        true
    }

    /// Apply matches in order
    pub fn apply_all<'a>(&mut self, matches: impl IntoIterator<Item = &'a TokenMatch>) {
        for m in matches {
            self.apply(m);
        }
    }

    /// Register the base variable for `family` at `intensity`.
    ///
    /// Stock stops are assumed to be defined elsewhere and are skipped.
    pub fn add_color(&mut self, family: &str, intensity: u32) {
        if is_stop(intensity) {
            return;
        }
        let name = format!("--color-{}-{}", family, intensity);
        if self.mapping.contains(&name) {
            return;
        }
        self.mapping.insert_if_absent(name, synthesize(family, intensity));
    }

    fn add_variant(&mut self, variant: &str, family: &str, intensity: &Intensity, toward: &str) {
        self.mapping.insert_if_absent(
            format!("--color-{}-{}-{}", variant, family, intensity),
            format!(
                "color-mix(in oklab, {} 50%, {})",
                color_var(family, intensity),
                toward
            ),
        );
        self.add_color(family, intensity.value());
    }

    /// Number of distinct literals processed so far
    pub fn parsed_len(&self) -> usize {
        self.parsed.len()
    }

    pub fn mapping(&self) -> &ThemeMapping {
        &self.mapping
    }

    pub fn finish(self) -> ThemeMapping {
        self.mapping
    }
}
