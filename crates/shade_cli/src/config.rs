//! Shade configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shade_scan::DEFAULT_EXTENSIONS;
use shade_theme::Options;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = "shade.toml";

/// Top-level Shade configuration (shade.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShadeConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    /// Passed through to the scan session
    #[serde(default)]
    pub options: Options,
}

/// Which files are scanned
#[derive(Debug, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Project root to walk
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// File extensions to scan, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
        }
    }
}

/// Where the theme block goes
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Stylesheet the block is prepended to
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Destination stylesheet (stdout when unset)
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Dependency manifest (JSON)
    #[serde(default)]
    pub deps: Option<PathBuf>,
}

/// Watch mode configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Quiet period before a change triggers a pass
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ShadeConfig {
    /// Load an explicit config file. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `shade init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: ShadeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `shade.toml` from a directory, falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            tracing::debug!(dir = %dir.display(), "No shade.toml, using defaults");
            Ok(Self::default())
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: ShadeConfig = toml::from_str("").unwrap();
        assert_eq!(config.scan.root, PathBuf::from("."));
        assert_eq!(config.scan.extensions, vec!["ts", "tsx", "js", "jsx", "html"]);
        assert_eq!(config.watch.debounce_ms, 100);
        assert!(config.output.input.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config: ShadeConfig = toml::from_str(
            r#"
[scan]
root = "web"
extensions = ["vue"]

[output]
input = "web/app.css"
output = "dist/app.css"

[watch]
debounce_ms = 250

[options]
anything = "ignored"
"#,
        )
        .unwrap();
        assert_eq!(config.scan.root, PathBuf::from("web"));
        assert_eq!(config.scan.extensions, vec!["vue"]);
        assert_eq!(config.output.input, Some(PathBuf::from("web/app.css")));
        assert_eq!(config.output.output, Some(PathBuf::from("dist/app.css")));
        assert_eq!(config.output.deps, None);
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn default_config_round_trips() {
        let text = ShadeConfig::default().to_toml().unwrap();
        let config: ShadeConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.scan.extensions.len(), 5);
    }

    #[test]
    fn missing_dir_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShadeConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShadeConfig::load_from_file(&dir.path().join("shade.toml")).unwrap_err();
        assert!(err.to_string().contains("shade init"));
    }
}
