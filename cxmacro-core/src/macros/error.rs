//! Macro errors
//!
//! Every error is reported back to the dispatcher as a rejected command.
//! An aborted heat wait is not an error; see [`super::MacroReport`].

use core::fmt;

use crate::traits::{GcodeError, HeaterError, ProbeError};

/// Errors returned by macro operations
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroError {
    /// Command name not in the macro table
    UnknownCommand,
    /// Parameter value could not be parsed
    InvalidParameter { param: &'static str },
    /// Parameter value outside its accepted range
    OutOfRange {
        param: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A required collaborator is not present
    MissingDependency(&'static str),
    /// The operation needs state an earlier macro should have resolved
    Precondition(&'static str),
    /// The dispatcher failed a script
    Gcode(GcodeError),
    /// The heater refused a request
    Heater(HeaterError),
    /// The probe refused its configuration
    Probe(ProbeError),
}

impl From<GcodeError> for MacroError {
    fn from(e: GcodeError) -> Self {
        MacroError::Gcode(e)
    }
}

impl From<HeaterError> for MacroError {
    fn from(e: HeaterError) -> Self {
        MacroError::Heater(e)
    }
}

impl From<ProbeError> for MacroError {
    fn from(e: ProbeError) -> Self {
        MacroError::Probe(e)
    }
}

impl fmt::Display for MacroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroError::UnknownCommand => f.write_str("unknown command"),
            MacroError::InvalidParameter { param } => {
                write!(f, "unable to parse '{}'", param)
            }
            MacroError::OutOfRange {
                param,
                value,
                min,
                max,
            } => write!(
                f,
                "{} = {} out of range (must be between {} and {})",
                param, value, min, max
            ),
            MacroError::MissingDependency(name) => write!(f, "missing dependency: {}", name),
            MacroError::Precondition(what) => write!(f, "precondition failed: {}", what),
            MacroError::Gcode(e) => write!(f, "{}", e),
            MacroError::Heater(e) => write!(f, "{}", e),
            MacroError::Probe(e) => write!(f, "{}", e),
        }
    }
}
