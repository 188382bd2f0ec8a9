use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_LOOKUP_PREFIX;

pub const CONFIG_FILE_NAME: &str = ".arbxrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Translation resource file, relative to the config file.
    #[serde(default = "default_resource_path", alias = "arbFile")]
    pub resource_path: String,
    /// Accessor that replacement text calls through (`S.current.key`).
    #[serde(default = "default_lookup_prefix")]
    pub lookup_prefix: String,
    /// Command run after each write to the resource file. Empty disables it.
    #[serde(default)]
    pub codegen_command: Vec<String>,
    /// Token that tags string literals for `arbx scan`.
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Source file extensions scanned for tagged literals.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_resource_path() -> String {
    "lib/l10n/intl_en.arb".to_string()
}

fn default_lookup_prefix() -> String {
    DEFAULT_LOOKUP_PREFIX.to_string()
}

fn default_marker() -> String {
    ".i18n".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["lib".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["dart".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_path: default_resource_path(),
            lookup_prefix: default_lookup_prefix(),
            codegen_command: Vec::new(),
            marker: default_marker(),
            includes: default_includes(),
            ignores: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or `includes`, an
    /// empty marker, or an empty resource path.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.marker.trim().is_empty() {
            bail!("'marker' must not be empty");
        }
        if self.resource_path.trim().is_empty() {
            bail!("'resourcePath' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against: the config file's
    /// directory, or the start directory when defaults are used.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    /// Absolute location of the resource file.
    pub fn resource_path(&self) -> PathBuf {
        self.root.join(&self.config.resource_path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
