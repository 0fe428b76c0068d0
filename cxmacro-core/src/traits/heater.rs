//! Heater request trait
//!
//! Heater control itself lives in the host. Macros only ask for a target
//! and then observe progress through a [`crate::heatwait::HeatSignal`].

use core::fmt;

/// Heaters a macro can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaterId {
    /// Hotend heater
    Extruder,
}

/// Errors from heater requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaterError {
    /// The heater refused the target (outside its own min/max)
    TargetRejected,
    /// The heater is not available (shutdown, not configured)
    Unavailable,
}

impl fmt::Display for HeaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaterError::TargetRejected => f.write_str("heater rejected target"),
            HeaterError::Unavailable => f.write_str("heater unavailable"),
        }
    }
}

/// Access to the host heater subsystem
pub trait HeaterBus {
    /// Start heating `heater` to `target_c`
    ///
    /// Must not block. With `wait` set the heater owner arms the heat signal
    /// and reports progress through it.
    fn set_temperature(&mut self, heater: HeaterId, target_c: f32, wait: bool)
        -> Result<(), HeaterError>;
}
