//! Project setup

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{ShadeConfig, CONFIG_FILE};

/// Write a default shade.toml into `dir`
pub fn create_config(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let body = ShadeConfig::default().to_toml()?;
    fs::write(&path, format!("{}{}", HEADER, body))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

const HEADER: &str = r#"# Shade configuration
#
# [scan]    root + extensions of the files searched for color utilities
# [output]  input stylesheet, output stylesheet, dependency manifest
# [watch]   debounce for `shade watch`

"#;
