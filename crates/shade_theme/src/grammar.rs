//! Utility-token grammars
//!
//! Four token shapes are recognized, each anchored to one of the color
//! utility prefixes in [`UTILITY_PREFIXES`]:
//!
//! | kind    | shape                                  | example               |
//! |---------|----------------------------------------|-----------------------|
//! | `mix`   | `<prefix>-<family>-<family>-<digits>`  | `border-blue-red-450` |
//! | `light` | `<prefix>-light-<family>-<digits>`     | `text-light-green-400`|
//! | `dark`  | `<prefix>-dark-<family>-<digits>`      | `bg-dark-slate-150`   |
//! | `plain` | `<prefix>-<family>-<digits>`           | `bg-blue-150`         |
//!
//! Every rule scans the whole input on its own (leftmost, non-overlapping
//! matches). The rules run in [`TokenKind::PRECEDENCE`] order and
//! [`GrammarSet::scan`] returns their matches in that order, so when the same
//! literal is picked up by more than one rule, the earlier rule's match comes
//! first and wins the literal dedup in the variable builder.

use regex::{Captures, Regex};
use tracing::debug;

use crate::palette::Intensity;

/// Utility prefixes that take a color argument
pub const UTILITY_PREFIXES: [&str; 13] = [
    "bg",
    "text",
    "decoration",
    "border",
    "outline",
    "shadow",
    "inset-shadow",
    "ring",
    "inset-ring",
    "accent",
    "caret",
    "fill",
    "stroke",
];

/// Words that name a variant, never a color family, in a `mix` token
pub const RESERVED_FAMILIES: [&str; 2] = ["light", "dark"];

/// Grammar kind, one per token shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Two families mixed 50/50
    Mix,
    /// Base color mixed 50/50 with white
    Light,
    /// Base color mixed 50/50 with black
    Dark,
    /// Base color only
    Plain,
}

impl TokenKind {
    /// Evaluation order. The first rule to claim a literal wins.
    pub const PRECEDENCE: [TokenKind; 4] = [
        TokenKind::Mix,
        TokenKind::Light,
        TokenKind::Dark,
        TokenKind::Plain,
    ];

    /// Stable id for logs
    pub fn id(self) -> &'static str {
        match self {
            Self::Mix => "mix",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Plain => "plain",
        }
    }

    fn pattern(self) -> String {
        let prefixes = UTILITY_PREFIXES.join("|");
        let shape = match self {
            Self::Mix => "([a-zA-Z]+)-([a-zA-Z]+)-([0-9]+)",
            Self::Light => "light-([a-zA-Z]+)-([0-9]+)",
            Self::Dark => "dark-([a-zA-Z]+)-([0-9]+)",
            Self::Plain => "([a-zA-Z]+)-([0-9]+)",
        };
        format!("(?:{})-{}", prefixes, shape)
    }
}

/// A recognized color token
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Plain {
        family: String,
        intensity: Intensity,
    },
    Light {
        family: String,
        intensity: Intensity,
    },
    Dark {
        family: String,
        intensity: Intensity,
    },
    Mix {
        first: String,
        second: String,
        intensity: Intensity,
    },
}

impl Token {
    /// Which grammar produced this token
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Plain { .. } => TokenKind::Plain,
            Token::Light { .. } => TokenKind::Light,
            Token::Dark { .. } => TokenKind::Dark,
            Token::Mix { .. } => TokenKind::Mix,
        }
    }

    pub fn intensity(&self) -> &Intensity {
        match self {
            Token::Plain { intensity, .. }
            | Token::Light { intensity, .. }
            | Token::Dark { intensity, .. }
            | Token::Mix { intensity, .. } => intensity,
        }
    }
}

/// A token together with the literal text it was matched from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMatch {
    /// The matched substring, used for per-pass dedup
    pub literal: String,
    pub token: Token,
}

/// A single grammar rule with its compiled pattern
#[derive(Clone)]
pub struct TokenRule {
    kind: TokenKind,
    pattern: Regex,
}

impl TokenRule {
    /// Compile the rule for `kind`
    ///
    /// # Panics
    /// Never in practice: the patterns are built from fixed literals.
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            pattern: Regex::new(&kind.pattern()).expect("utility token pattern is valid"),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Get the regex pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// All accepted matches of this rule in `content`, in position order
    pub fn matches<'a>(&'a self, content: &'a str) -> impl Iterator<Item = TokenMatch> + 'a {
        self.pattern
            .captures_iter(content)
            .filter_map(move |caps| self.token(&caps))
    }

    fn token(&self, caps: &Captures<'_>) -> Option<TokenMatch> {
        let literal = &caps[0];
        let token = match self.kind {
            TokenKind::Mix => {
                let (first, second) = (&caps[1], &caps[2]);
                if RESERVED_FAMILIES.contains(&first) || RESERVED_FAMILIES.contains(&second) {
                    return None;
                }
                Token::Mix {
                    first: first.to_string(),
                    second: second.to_string(),
                    intensity: self.intensity(literal, &caps[3])?,
                }
            }
            TokenKind::Light => Token::Light {
                family: caps[1].to_string(),
                intensity: self.intensity(literal, &caps[2])?,
            },
            TokenKind::Dark => Token::Dark {
                family: caps[1].to_string(),
                intensity: self.intensity(literal, &caps[2])?,
            },
            TokenKind::Plain => Token::Plain {
                family: caps[1].to_string(),
                intensity: self.intensity(literal, &caps[2])?,
            },
        };
        Some(TokenMatch {
            literal: literal.to_string(),
            token,
        })
    }

    fn intensity(&self, literal: &str, digits: &str) -> Option<Intensity> {
        let intensity = Intensity::parse(digits);
        if intensity.is_none() {
            debug!(
                rule = self.kind.id(),
                literal, "Intensity out of range, token dropped"
            );
        }
        intensity
    }
}

impl std::fmt::Debug for TokenRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// The ordered set of grammar rules
#[derive(Clone, Debug)]
pub struct GrammarSet {
    rules: Vec<TokenRule>,
}

impl GrammarSet {
    /// Build all four rules in [`TokenKind::PRECEDENCE`] order
    pub fn new() -> Self {
        Self {
            rules: TokenKind::PRECEDENCE
                .iter()
                .map(|&kind| TokenRule::new(kind))
                .collect(),
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Run every rule over `content`, concatenating matches rule by rule.
    ///
    /// Repeated literals are kept; dedup is a per-pass concern of the
    /// builder, which also sees matches from other files.
    pub fn scan(&self, content: &str) -> Vec<TokenMatch> {
        self.rules
            .iter()
            .flat_map(|rule| rule.matches(content))
            .collect()
    }
}

impl Default for GrammarSet {
    fn default() -> Self {
        Self::new()
    }
}
