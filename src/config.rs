//! Folio configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file is
//! sparse: stock defaults are the base layer and the user's file overrides
//! only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [github]
//! account = "Aaron-2005"               # Whose repositories to show
//! featured = []                        # Curated repo names, in display order
//! per_page = 50                        # Over-fetch size before filtering
//! api_base = "https://api.github.com"
//! preview_base = "https://opengraph.githubassets.com"
//!
//! [gallery]
//! container_id = "projects-list"       # Element the cards are rendered into
//! max_cards = 4                        # Cap on rendered cards
//! skeleton_count = 4                   # Placeholders shown while loading
//! ```
//!
//! An empty `featured` list means "most recently updated first". Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Folio configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Where repositories come from.
    pub github: GithubConfig,
    /// How the project gallery is rendered.
    pub gallery: GalleryConfig,
}

impl FolioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.account.trim().is_empty() {
            return Err(ConfigError::Validation(
                "github.account must not be empty".into(),
            ));
        }
        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(ConfigError::Validation(
                "github.per_page must be 1-100".into(),
            ));
        }
        if self.gallery.max_cards == 0 {
            return Err(ConfigError::Validation(
                "gallery.max_cards must be non-zero".into(),
            ));
        }
        if self.gallery.container_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.container_id must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Repository source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Account whose owned repositories are listed.
    pub account: String,
    /// Curated repository names, matched case-insensitively, in display order.
    pub featured: Vec<String>,
    /// How many repositories to request before filtering (GitHub caps at 100).
    pub per_page: u32,
    /// REST API root.
    pub api_base: String,
    /// Root of the generated social-preview images.
    pub preview_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            account: "Aaron-2005".to_string(),
            featured: Vec::new(),
            per_page: 50,
            api_base: "https://api.github.com".to_string(),
            preview_base: "https://opengraph.githubassets.com".to_string(),
        }
    }
}

/// Gallery rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Id of the element the gallery renders into.
    pub container_id: String,
    /// Maximum number of project cards, whatever the selection source.
    pub max_cards: usize,
    /// Number of skeleton placeholders shown while loading.
    pub skeleton_count: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            container_id: "projects-list".to_string(),
            max_cards: 4,
            skeleton_count: 4,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FolioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value,
/// so `featured = []` really does clear the list.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FolioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FolioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<FolioConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Repository source
# ---------------------------------------------------------------------------
[github]
# Account whose (non-fork, non-archived) repositories are shown.
account = "Aaron-2005"

# Curated repositories, in the order they should appear. Names match
# case-insensitively; names that are not found are skipped.
# Leave empty to show the most recently updated repositories instead.
featured = []

# Repositories requested before filtering. GitHub allows at most 100.
per_page = 50

# REST API root. Point this at a mirror or a local stub for testing.
api_base = "https://api.github.com"

# Root of the generated social-preview images used as card artwork.
preview_base = "https://opengraph.githubassets.com"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Id of the page element the cards are rendered into.
container_id = "projects-list"

# Maximum number of project cards.
max_cards = 4

# Skeleton placeholders shown while repositories load.
skeleton_count = 4
"##
}
