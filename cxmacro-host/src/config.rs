//! Host configuration file

use std::fs;
use std::path::{Path, PathBuf};

use cxmacro_core::config::{ConfigError, MacroConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while loading the host configuration
#[derive(Debug, Error)]
pub enum HostConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [custom_macro] section: {0}")]
    Invalid(ConfigError),
}

impl From<ConfigError> for HostConfigError {
    fn from(err: ConfigError) -> Self {
        HostConfigError::Invalid(err)
    }
}

/// `[speed_mode]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedModeConfig {
    /// File read by the print job to pick its speed mode
    ///
    /// Without a path quiet mode only sets its flag.
    pub path: Option<PathBuf>,
}

/// Complete host configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub custom_macro: MacroConfig,
    pub speed_mode: SpeedModeConfig,
}

impl HostConfig {
    /// Parse and validate a configuration document
    ///
    /// Missing sections and options take their defaults. The homing
    /// ceiling is capped during validation.
    pub fn from_toml_str(content: &str) -> Result<Self, HostConfigError> {
        let mut config: HostConfig = toml::from_str(content)?;
        config.custom_macro = config.custom_macro.validated()?;
        log::debug!("loaded config: {:?}", config);
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HostConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| HostConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert_eq!(config.custom_macro, MacroConfig::default());
        assert_eq!(config.speed_mode.path, None);
    }

    #[test]
    fn test_full_document() {
        let config = HostConfig::from_toml_str(
            r#"
            [custom_macro]
            default_extruder_temp = 240.0
            default_bed_temp = 60.0
            g28_ext_temp = 170.0
            nozzle_clear = false
            calibration = 1
            heat_timeout_ms = 600000

            [speed_mode]
            path = "/tmp/speed_mode.json"
            "#,
        )
        .unwrap();

        let m = config.custom_macro;
        assert_eq!(m.default_extruder_temp, 240.0);
        assert_eq!(m.default_bed_temp, 60.0);
        assert_eq!(m.g28_ext_temp, 170.0);
        assert!(!m.nozzle_clear);
        assert_eq!(m.calibration, 1);
        assert_eq!(m.heat_timeout_ms, Some(600_000));
        assert_eq!(
            config.speed_mode.path.as_deref(),
            Some(Path::new("/tmp/speed_mode.json"))
        );
    }

    #[test]
    fn test_g28_clamped_on_load() {
        let config = HostConfig::from_toml_str("[custom_macro]\ng28_ext_temp = 250.0\n").unwrap();
        assert_eq!(config.custom_macro.g28_ext_temp, 200.0);
    }

    #[test]
    fn test_out_of_range_default_is_fatal() {
        let result = HostConfig::from_toml_str("[custom_macro]\ndefault_extruder_temp = 400.0\n");
        assert!(matches!(
            result,
            Err(HostConfigError::Invalid(ConfigError::TemperatureOutOfRange {
                option: "default_extruder_temp",
                ..
            }))
        ));
    }

    #[test]
    fn test_malformed_document() {
        let result = HostConfig::from_toml_str("[custom_macro\n");
        assert!(matches!(result, Err(HostConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = HostConfig::load("/nonexistent/cxmacro.toml");
        assert!(matches!(result, Err(HostConfigError::Read { .. })));
    }
}
