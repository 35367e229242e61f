//! Merge settings loaded from a TOML file.
//!
//! Settings resolve in three layers, later layers winning:
//!
//! ```text
//! stock defaults  →  --config FILE  →  command-line flags
//! ```
//!
//! The file is only read when passed explicitly; nothing is looked up in the
//! working directory or home directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! mode = "2-horizontal"     # 2-horizontal, 2-vertical, 3-horizontal, 3-vertical, 4-grid
//!
//! [gap]
//! width = 10                # Pixels between images, 0-10000
//! color = "#FFFFFF"         # Also fills empty grid cells
//!
//! [border]
//! width = 0                 # 0-10000, 0 disables the frame
//! color = "#000000"
//!
//! [output]
//! jpeg_quality = 90         # 1-100, only used for .jpg/.jpeg output
//! ```
//!
//! Files are sparse: override just the values you want. Unknown keys are
//! rejected to catch typos early. Colors are not checked here; an invalid
//! color falls back at merge time with a warning.

use crate::color::{DEFAULT_BORDER_COLOR, DEFAULT_GAP_COLOR};
use crate::imaging::Quality;
use crate::types::{BorderSpec, GapSpec, MergeMode, MergeRequest};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Merge settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub mode: MergeMode,
    pub gap: GapConfig,
    pub border: BorderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GapConfig {
    /// Signed so a negative value reaches the merge's width check.
    pub width: i64,
    pub color: String,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            width: 10,
            color: DEFAULT_GAP_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderConfig {
    pub width: i64,
    pub color: String,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            width: 0,
            color: DEFAULT_BORDER_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value(),
        }
    }
}

impl MergeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// Build a request from these settings for the given inputs and destination.
    pub fn to_request(&self, image_paths: Vec<PathBuf>, output_path: Option<PathBuf>) -> MergeRequest {
        MergeRequest {
            mode: self.mode,
            image_paths,
            gap: GapSpec {
                width: self.gap.width,
                color: self.gap.color.clone(),
            },
            border: BorderSpec {
                width: self.border.width,
                color: self.border.color.clone(),
            },
            output_path,
            jpeg_quality: Quality::new(self.output.jpeg_quality),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(MergeConfig::default())?)
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

/// Read a config file as a raw TOML value.
///
/// Unlike a directory lookup, a missing file is an error: the caller asked for it.
pub fn load_raw_config(file: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(file)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MergeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MergeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults, with `file` merged on top when given.
pub fn load_config(file: Option<&Path>) -> Result<MergeConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = file.map(load_raw_config).transpose()?;
    if let Some(path) = file {
        log::debug!("loaded config from {}", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Merger Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Use with: image-merger merge --config merge.toml ...
# Command-line flags override values from this file.
# Unknown keys will cause an error.

# Layout of the composite:
#   2-horizontal, 3-horizontal  side by side, scaled to the shortest image
#   2-vertical, 3-vertical      stacked, scaled to the narrowest image
#   4-grid                      2x2, rows scaled to their shorter image
mode = "2-horizontal"

# ---------------------------------------------------------------------------
# Spacing between images
# ---------------------------------------------------------------------------
[gap]
# Pixels between adjacent images (0-10000).
width = 10

# Gap color. Also fills the unused part of narrower grid cells.
# Accepts #RGB, #RRGGBB, #RRGGBBAA (alpha ignored), rgb(r, g, b) or a name.
color = "#FFFFFF"

# ---------------------------------------------------------------------------
# Frame around the finished composite
# ---------------------------------------------------------------------------
[border]
# Frame thickness in pixels (0-10000). 0 disables the frame.
width = 0
color = "#000000"

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality for .jpg/.jpeg destinations (1 = worst, 100 = best).
jpeg_quality = 90
"##
}
