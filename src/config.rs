//! Configuration loading.
//!
//! Two kinds of configuration feed the adapters:
//!
//! - **Service configuration** (`adapters.toml`): the URL rewriter's entry
//!   lists, loaded once when the rewriter activates and reloaded wholesale.
//! - **Site theme configuration** (`conf/**/theme.toml`): cascading per-site
//!   values for the theme stylesheet, resolved fresh for each resource.
//!
//! ## Service Configuration
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! conf_root = "conf"   # Root of the theme configuration tree
//!
//! [url_rewriter]
//! urls_to_be_re_written = []   # JSON objects: {"internalUrl": ..., "externalUrl": ...}
//! urls_to_be_skipped = []      # Plain path prefixes
//! ```
//!
//! Unknown keys are rejected to catch typos early. Individual malformed
//! rewrite entries are not a load error: the rewriter logs and skips them.
//!
//! ## Theme Cascade
//!
//! The theme tree mirrors content paths below `/content`:
//!
//! ```text
//! conf/
//! ├── theme.toml                 # Global (overrides built-in defaults)
//! └── adobexp/
//!     ├── theme.toml             # Site (overrides global)
//!     └── us/
//!         └── en/
//!             └── theme.toml     # Language branch (overrides site)
//! ```
//!
//! Resolving `/content/adobexp/us/en/about` merges every `theme.toml` found
//! on the way down, deeper files winning key by key. Files are flat tables of
//! string values keyed by the names listed in [`crate::theme`]. Keys not in
//! that list are logged and ignored; `check` reports them as errors.

use crate::theme::{self, ThemeConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const THEME_FILE: &str = "theme.toml";
const CONTENT_ROOT: &str = "/content";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `adapters.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Root directory of the theme configuration tree.
    pub conf_root: String,
    /// URL rewriter entry lists.
    pub url_rewriter: UrlRewriterSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conf_root: "conf".to_string(),
            url_rewriter: UrlRewriterSettings::default(),
        }
    }
}

impl AppConfig {
    /// Reject values that make the service unusable. Skip prefixes that can
    /// never match an absolute path only get a warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conf_root.trim().is_empty() {
            return Err(ConfigError::Validation("conf_root must not be empty".into()));
        }
        for prefix in self
            .url_rewriter
            .urls_to_be_skipped
            .iter()
            .filter(|p| !p.is_empty() && !p.starts_with('/'))
        {
            tracing::warn!(prefix = prefix.as_str(), "skip prefix is not an absolute path");
        }
        Ok(())
    }
}

/// Raw entry lists for [`crate::rewrite::RewriteRules`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlRewriterSettings {
    /// JSON-encoded `{"internalUrl": ..., "externalUrl": ...}` objects.
    pub urls_to_be_re_written: Vec<String>,
    /// Path prefixes that are never rewritten.
    pub urls_to_be_skipped: Vec<String>,
}

/// Load service configuration from a TOML file.
///
/// A missing file yields the defaults. Invalid TOML, unknown keys, and
/// failed validation are errors.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no service config, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `adapters.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Adapters Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Root of the theme configuration tree (conf/<site>/.../theme.toml).
conf_root = "conf"

# ---------------------------------------------------------------------------
# URL rewriter
# ---------------------------------------------------------------------------
[url_rewriter]
# Internal prefixes rewritten to public prefixes, one JSON object per entry.
# The first entry whose internalUrl starts the path wins, so list more
# specific prefixes first. Malformed entries are logged and skipped.
urls_to_be_re_written = [
  # '{"internalUrl":"/content/dam/","externalUrl":"/static/assets"}',
]

# Path prefixes that are never rewritten. Checked before the entries above.
# An empty string matches every path and turns rewriting off.
urls_to_be_skipped = [
  # "/content/dam/private",
]
"##
}

// =============================================================================
// Theme cascade
// =============================================================================

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `theme.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `theme.toml`.
pub fn load_raw_theme(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(THEME_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Resolves the effective theme configuration for a content resource by
/// walking the `conf/` tree.
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    conf_root: PathBuf,
}

impl ThemeResolver {
    pub fn new(conf_root: impl Into<PathBuf>) -> Self {
        Self {
            conf_root: conf_root.into(),
        }
    }

    pub fn conf_root(&self) -> &Path {
        &self.conf_root
    }

    /// Directories consulted for `resource_path`, shallowest first.
    ///
    /// Paths outside `/content` only see the global level.
    pub fn cascade(&self, resource_path: &str) -> Vec<PathBuf> {
        let mut dirs = vec![self.conf_root.clone()];
        let Some(rest) = resource_path
            .strip_prefix(CONTENT_ROOT)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        else {
            return dirs;
        };
        let mut current = self.conf_root.clone();
        for segment in rest.split('/').filter(|s| !s.is_empty() && *s != "..") {
            current.push(segment);
            dirs.push(current.clone());
        }
        dirs
    }

    /// Merge every `theme.toml` on the cascade.
    ///
    /// Unknown keys are logged and dropped so a typo in one file never
    /// discards the valid overrides around it.
    pub fn resolve(&self, resource_path: &str) -> Result<ThemeConfig, ConfigError> {
        let table: toml::Table = self
            .merged(resource_path)?
            .into_iter()
            .filter(|(key, _)| {
                let known = theme::is_known_key(key);
                if !known {
                    tracing::warn!(key = key.as_str(), resource_path, "ignoring unknown theme key");
                }
                known
            })
            .collect();
        Ok(ThemeConfig::from_table(table))
    }

    /// Strict variant for `check`: an unknown key on the cascade is an error.
    pub fn validate(&self, resource_path: &str) -> Result<(), ConfigError> {
        let table = self.merged(resource_path)?;
        match table.keys().find(|k| !theme::is_known_key(k)) {
            Some(unknown) => Err(ConfigError::Validation(format!(
                "unknown theme key `{unknown}` for {resource_path}"
            ))),
            None => Ok(()),
        }
    }

    fn merged(&self, resource_path: &str) -> Result<toml::Table, ConfigError> {
        let mut merged = toml::Value::Table(toml::Table::new());
        for dir in self.cascade(resource_path) {
            if let Some(overlay) = load_raw_theme(&dir)? {
                tracing::debug!(dir = %dir.display(), "applying theme overlay");
                merged = merge_toml(merged, overlay);
            }
        }
        match merged {
            toml::Value::Table(table) => Ok(table),
            _ => Err(ConfigError::Validation("theme config must be a table".into())),
        }
    }
}
