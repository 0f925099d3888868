//! Generator configuration module.
//!
//! Handles loading, validating, and merging `manifest.toml`. Stock defaults
//! are serialized to a TOML table, the user's file is merged on top of it,
//! and the result is deserialized and validated. CLI flags are applied last
//! by the binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! images_dir = "src/img"
//! extensions = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg"]
//! order = "sorted"             # or "discovered"
//!
//! [tags]
//! policy = "filename-prefix"   # or "top-directory"
//! root_files = "filename"      # or "skip"
//!
//! [url]
//! base = "/web/avatars/avatars/"
//! template = "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/{ref}/{version}/src/img/"
//!
//! [output]
//! path = "src/js/constants.js"
//! export_name = "constants"
//! header = true
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::manifest::Order;
use crate::tags::{RootFiles, TagPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "manifest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `manifest.toml`.
///
/// All fields have defaults matching the layout of the avatar gallery front
/// end. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Root of the image tree to scan.
    pub images_dir: PathBuf,
    /// File name suffixes that mark a file as an image (case-sensitive).
    pub extensions: Vec<String>,
    /// Ordering of both output lists.
    pub order: Order,
    /// Category tag derivation.
    pub tags: TagsConfig,
    /// Base URL settings.
    pub url: UrlConfig,
    /// Generated module settings.
    pub output: OutputConfig,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("src/img"),
            extensions: [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            order: Order::default(),
            tags: TagsConfig::default(),
            url: UrlConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ManifestConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::Validation(
                "extensions must not contain empty entries".into(),
            ));
        }
        if !self.url.template.contains("{version}") {
            return Err(ConfigError::Validation(
                "url.template must contain a {version} placeholder".into(),
            ));
        }
        if !is_js_identifier(&self.output.export_name) {
            return Err(ConfigError::Validation(format!(
                "output.export_name '{}' is not a valid JavaScript identifier",
                self.output.export_name
            )));
        }
        Ok(())
    }
}

/// Category tag settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Which part of the path becomes the tag.
    pub policy: TagPolicy,
    /// What `top-directory` does with files sitting directly in the root.
    pub root_files: RootFiles,
}

/// Base URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlConfig {
    /// Fixed prefix used by the `static` command.
    pub base: String,
    /// Template used by the `version` command. `{version}` is required,
    /// `{ref}` is optional and expands to `tags` or `heads`.
    pub template: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            base: "/web/avatars/avatars/".to_string(),
            template: "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/{ref}/{version}/src/img/"
                .to_string(),
        }
    }
}

/// Generated module settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the generated JavaScript module.
    pub path: PathBuf,
    /// Name of the exported constants object.
    pub export_name: String,
    /// Emit the JSDoc block describing the object.
    pub header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/js/constants.js"),
            export_name: "constants".to_string(),
            header: true,
        }
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ManifestConfig::default()).expect("default config must serialize")
}

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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ManifestConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ManifestConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<ManifestConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `manifest.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gallery-manifest configuration
# ==============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory scanned recursively for images.
images_dir = "src/img"

# A file is an image when its name ends with one of these suffixes.
# Matching is case-sensitive: "photo.PNG" is not picked up by ".png".
extensions = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg"]

# Ordering of srcImages and options in the generated module.
#   "sorted"     - lexicographic, byte-identical output across runs
#   "discovered" - first-seen walk order, not stable across filesystems
order = "sorted"

# ---------------------------------------------------------------------------
# Category tags
# ---------------------------------------------------------------------------
[tags]
# "filename-prefix" - file name up to the first '-' (fox-1.png -> fox)
# "top-directory"   - first path segment (animals/fox-1.png -> animals)
policy = "filename-prefix"

# With "top-directory", files directly in images_dir have no directory.
#   "filename" - use the file name as the tag
#   "skip"     - list the image but derive no tag
# Both report a warning.
root_files = "filename"

# ---------------------------------------------------------------------------
# Base URL
# ---------------------------------------------------------------------------
[url]
# Prefix used by `gallery-manifest static`.
base = "/web/avatars/avatars/"

# Template used by `gallery-manifest version <VERSION>`.
# {version} is replaced by the argument; {ref} becomes "tags" when the
# version starts with 'v' and "heads" otherwise.
template = "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/{ref}/{version}/src/img/"

# ---------------------------------------------------------------------------
# Generated module
# ---------------------------------------------------------------------------
[output]
path = "src/js/constants.js"
export_name = "constants"

# Include the JSDoc block above the exported object.
header = true
"##
}
