//! Tool configuration module.
//!
//! Handles loading and validating an optional `imgr.toml`. The file only
//! supplies defaults; explicit command-line flags always win.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [transform]
//! quality = 90          # JPEG quality (0-100)
//! no_enlarge = false    # Never upscale when fitting
//!
//! [output]
//! json = false          # Render results as a JSON envelope
//! ```
//!
//! Config files are sparse, so override just the values you want:
//!
//! ```toml
//! [transform]
//! quality = 75
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Configuration loaded from a TOML file.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImgrConfig {
    /// Defaults for `transform` and `clip`.
    pub transform: TransformConfig,
    /// Result rendering.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// JPEG quality used when `--quality` is not given.
    pub quality: u32,
    /// Treat every transform as if `--no-enlarge` were passed.
    pub no_enlarge: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            no_enlarge: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub json: bool,
}

impl ImgrConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.quality > 100 {
            return Err(ConfigError::Validation(format!(
                "transform.quality must be 0-100, got {}",
                self.transform.quality
            )));
        }
        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<ImgrConfig, ConfigError> {
    let config: ImgrConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`, or the stock defaults when no path is given.
///
/// A path that was given but does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<ImgrConfig, ConfigError> {
    match path {
        None => Ok(ImgrConfig::default()),
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let config = parse_config(&content)?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        }
    }
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgr Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Pass the file with --config.
# Command-line flags always override these values.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# transform / clip
# ---------------------------------------------------------------------------
[transform]
# JPEG encoding quality (0 = worst, 100 = best). Ignored by lossless formats.
quality = 90

# Never scale an image up to fit the requested bounds.
no_enlarge = false

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Print results as a JSON envelope instead of text.
json = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = ImgrConfig::default();
        assert_eq!(config.transform.quality, 90);
        assert!(!config.transform.no_enlarge);
        assert!(!config.output.json);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config("[transform]\nquality = 75\n").unwrap();
        // Overridden value
        assert_eq!(config.transform.quality, 75);
        // Default values preserved
        assert!(!config.transform.no_enlarge);
        assert!(!config.output.json);
    }

    #[test]
    fn parse_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), ImgrConfig::default());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        assert_eq!(parse_config(stock_config_toml()).unwrap(), ImgrConfig::default());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn quality_above_100_rejected() {
        let err = parse_config("[transform]\nquality = 101\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("101"));
    }

    #[test]
    fn negative_quality_is_parse_error() {
        let err = parse_config("[transform]\nquality = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = parse_config("[transform]\nqualty = 80\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn unknown_section_rejected() {
        let err = parse_config("[resize]\nwidth = 80\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_without_path_is_default() {
        assert_eq!(load_config(None).unwrap(), ImgrConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("imgr.toml");
        fs::write(&path, "[transform]\nno_enlarge = true\n\n[output]\njson = true\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(config.transform.no_enlarge);
        assert!(config.output.json);
        assert_eq!(config.transform.quality, 90);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("imgr.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Toml(_))));
    }
}
