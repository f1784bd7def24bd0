//! Theme block and dependency emission
//!
//! The host consumes two things from a pass: a `@theme inline` block to put
//! at the very start of its stylesheet, and one dependency record per
//! candidate file so its rebuild graph knows what to watch.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shade_theme::ThemeMapping;

/// Name reported in dependency records
pub const PLUGIN_NAME: &str = "shade";

/// One `property: value` line of the theme block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// `@theme inline { ... }` with declarations in discovery order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeBlock {
    declarations: Vec<Declaration>,
}

impl ThemeBlock {
    pub fn from_mapping(mapping: &ThemeMapping) -> Self {
        Self {
            declarations: mapping
                .iter()
                .map(|(property, value)| Declaration {
                    property: property.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

impl fmt::Display for ThemeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@theme inline {{")?;
        for decl in &self.declarations {
            writeln!(f, "  {}: {};", decl.property, decl.value)?;
        }
        writeln!(f, "}}")
    }
}

/// Kind tag of a host message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Dependency,
}

/// Tells the host that `parent` must be rebuilt when `file` changes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DependencyMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub plugin: String,
    pub file: PathBuf,
    pub parent: PathBuf,
}

/// Everything one pass hands to the host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Emission {
    /// `None` when there is nothing to declare
    pub block: Option<ThemeBlock>,
    pub dependencies: Vec<DependencyMessage>,
}

impl Emission {
    /// A pass with no candidates
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_none() && self.dependencies.is_empty()
    }

    /// Prepend the theme block to `document`
    pub fn apply(&self, document: &str) -> String {
        match &self.block {
            Some(block) => format!("{}{}", block, document),
            None => document.to_string(),
        }
    }

    /// Dependency records as a JSON array
    pub fn dependencies_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.dependencies)
    }
}

/// Builds emissions for one root document
#[derive(Clone, Debug)]
pub struct Emitter {
    origin: PathBuf,
}

impl Emitter {
    /// `origin` is the path of the document the block is injected into
    pub fn new(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Render `mapping` and record every path in `files` as a dependency.
    ///
    /// No files means no output at all. Files without any variables still
    /// yield dependency records, but no block.
    pub fn emit(&self, mapping: &ThemeMapping, files: &[PathBuf]) -> Emission {
        if files.is_empty() {
            return Emission::empty();
        }

        let dependencies = files
            .iter()
            .map(|file| DependencyMessage {
                kind: MessageKind::Dependency,
                plugin: PLUGIN_NAME.to_string(),
                file: file.clone(),
                parent: self.origin.clone(),
            })
            .collect();

        let block = if mapping.is_empty() {
            None
        } else {
            Some(ThemeBlock::from_mapping(mapping))
        };

        Emission {
            block,
            dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shade_theme::{GrammarSet, VariableBuilder};

    fn mapping(content: &str) -> ThemeMapping {
        let mut builder = VariableBuilder::new();
        builder.apply_all(&GrammarSet::new().scan(content));
        builder.finish()
    }

    #[test]
    fn renders_block_in_discovery_order() {
        let emission = Emitter::new("app.css").emit(
            &mapping("bg-blue-150 text-red-975"),
            &[PathBuf::from("index.html")],
        );
        let block = emission.block.unwrap();
        assert_eq!(
            block.to_string(),
            "@theme inline {\n  \
             --color-blue-150: color-mix(in oklab, var(--color-blue-100) 50%, var(--color-blue-200));\n  \
             --color-red-975: color-mix(in oklab, var(--color-red-950), var(--color-black) 50%);\n\
             }\n"
        );
    }

    #[test]
    fn no_files_means_no_output() {
        let emission = Emitter::new("app.css").emit(&mapping("bg-blue-150"), &[]);
        assert!(emission.is_empty());
        assert_eq!(emission.apply("body {}\n"), "body {}\n");
    }

    #[test]
    fn files_without_tokens_still_register_dependencies() {
        let emission =
            Emitter::new("app.css").emit(&ThemeMapping::new(), &[PathBuf::from("main.ts")]);
        assert!(emission.block.is_none());
        assert_eq!(emission.dependencies.len(), 1);
    }

    #[test]
    fn block_is_prepended() {
        let emission = Emitter::new("app.css")
            .emit(&mapping("fill-lime-25"), &[PathBuf::from("icon.jsx")]);
        assert_eq!(
            emission.apply("@import \"tailwindcss\";\n"),
            "@theme inline {\n  \
             --color-lime-25: color-mix(in oklab, var(--color-lime-50) 50%, var(--color-white));\n\
             }\n\
             @import \"tailwindcss\";\n"
        );
    }

    #[test]
    fn dependency_records_serialize_with_host_field_names() {
        let emission = Emitter::new("src/app.css").emit(
            &ThemeMapping::new(),
            &[PathBuf::from("a.ts"), PathBuf::from("b.html")],
        );
        let value: serde_json::Value =
            serde_json::from_str(&emission.dependencies_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "type": "dependency", "plugin": "shade", "file": "a.ts", "parent": "src/app.css" },
                { "type": "dependency", "plugin": "shade", "file": "b.html", "parent": "src/app.css" },
            ])
        );
    }
}
