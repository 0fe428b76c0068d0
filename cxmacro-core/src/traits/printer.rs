//! Print job collaborators used by quiet mode

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observation of the print job
pub trait PrintStatus {
    /// Check if a print is currently running
    fn is_printing(&self) -> bool;
}

/// Record read by the print job to pick a speed mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedModeRecord {
    pub speed_mode: u8,
}

impl SpeedModeRecord {
    /// Speed mode selected by quiet mode
    pub const QUIET: SpeedModeRecord = SpeedModeRecord { speed_mode: 2 };
}

/// Errors from persisting a speed-mode record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Writing or flushing the record failed
    Io,
    /// The record could not be encoded
    Encode,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io => f.write_str("speed mode write failed"),
            StoreError::Encode => f.write_str("speed mode record encoding failed"),
        }
    }
}

/// Destination of the speed-mode record
///
/// Implementations overwrite any existing record and flush it before
/// returning.
pub trait SpeedModeStore {
    fn write_record(&mut self, record: &SpeedModeRecord) -> Result<(), StoreError>;
}
