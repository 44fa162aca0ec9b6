use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-verdict/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub report: ReportConfig,
    pub relations: RelationsConfig,
}

/// How scanned paths map to libraries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Index of the path component naming the library. With the default
    /// `1`, `src/zlib/inflate.c` belongs to `zlib`.
    pub library_depth: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { library_depth: 1 }
    }
}

/// Mermaid report settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Written into the Mermaid front matter; large trees exceed the
    /// renderer's default limit.
    pub max_text_size: u32,
    /// Leave out the "no license" group when a library has other groups
    /// and a settled verdict.
    pub hide_no_license: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_text_size: 90_000,
            hide_no_license: true,
        }
    }
}

/// Project-specific inclusion facts applied after the curated table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelationsConfig {
    pub extra: Vec<RelationPair>,
}

/// `inner` is contained in `outer`.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationPair {
    pub outer: String,
    pub inner: String,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.license-verdict/config.toml`
/// 3. `~/.config/license-verdict/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_dir.join(".license-verdict").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-verdict")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}
