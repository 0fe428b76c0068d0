//! Macro configuration
//!
//! These types mirror the `[custom_macro]` config section. A config is
//! validated once at startup; any violation aborts startup.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::limits::{BED_TEMP_RANGE, EXTRUDER_TEMP_RANGE, G28_EXT_TEMP_MAX};

/// Configuration-time errors
///
/// All of these are fatal: the host must refuse to start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A listed command name has no handler in the macro table
    MissingHandler(&'static str),
    /// The dispatcher refused to register a command (e.g. name already taken)
    RegistrationRefused(&'static str),
    /// A temperature option lies outside its accepted range
    TemperatureOutOfRange { option: &'static str, value: f32 },
    /// A flag option is not 0 or 1
    InvalidFlag { option: &'static str, value: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingHandler(name) => write!(f, "no handler for command {}", name),
            ConfigError::RegistrationRefused(name) => {
                write!(f, "dispatcher refused to register {}", name)
            }
            ConfigError::TemperatureOutOfRange { option, value } => {
                write!(f, "option '{}' has out of range value {}", option, value)
            }
            ConfigError::InvalidFlag { option, value } => {
                write!(f, "option '{}' must be 0 or 1, got {}", option, value)
            }
        }
    }
}

/// Options of the `[custom_macro]` section
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MacroConfig {
    /// Extruder target used when a macro gets no explicit temperature (°C)
    pub default_extruder_temp: f32,
    /// Bed target used when a macro gets no explicit temperature (°C)
    pub default_bed_temp: f32,
    /// Extruder ceiling while homing (°C), capped at 200
    pub g28_ext_temp: f32,
    /// Enables `CX_NOZZLE_CLEAR`
    pub nozzle_clear: bool,
    /// Initial calibration flag (0 or 1)
    pub calibration: u8,
    /// Upper bound on a single heat wait in milliseconds
    ///
    /// `None` waits until the heater reports reached or aborted.
    pub heat_timeout_ms: Option<u32>,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            default_extruder_temp: 220.0,
            default_bed_temp: 50.0,
            g28_ext_temp: G28_EXT_TEMP_MAX,
            nozzle_clear: true,
            calibration: 0,
            heat_timeout_ms: None,
        }
    }
}

impl MacroConfig {
    /// Validate the options and apply the homing ceiling cap
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !EXTRUDER_TEMP_RANGE.contains(self.default_extruder_temp) {
            return Err(ConfigError::TemperatureOutOfRange {
                option: "default_extruder_temp",
                value: self.default_extruder_temp,
            });
        }
        if !BED_TEMP_RANGE.contains(self.default_bed_temp) {
            return Err(ConfigError::TemperatureOutOfRange {
                option: "default_bed_temp",
                value: self.default_bed_temp,
            });
        }
        // NaN fails this comparison too
        if !(self.g28_ext_temp >= 0.0) {
            return Err(ConfigError::TemperatureOutOfRange {
                option: "g28_ext_temp",
                value: self.g28_ext_temp,
            });
        }
        if self.calibration > 1 {
            return Err(ConfigError::InvalidFlag {
                option: "calibration",
                value: self.calibration,
            });
        }

        if self.g28_ext_temp > G28_EXT_TEMP_MAX {
            warn!(
                "g28_ext_temp {} above ceiling, clamped to {}",
                self.g28_ext_temp,
                G28_EXT_TEMP_MAX
            );
            self.g28_ext_temp = G28_EXT_TEMP_MAX;
        }

        Ok(self)
    }
}
