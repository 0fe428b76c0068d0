//! Status snapshots for telemetry

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MacroConfig;

use super::SessionState;

/// Read-only view of the registry state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacroStatus {
    pub calibration_flag: u8,
    pub default_extruder_temp: f32,
    pub default_bed_temp: f32,
    pub g28_ext_temp: f32,
    pub quiet_mode_flag: u8,
}

impl MacroStatus {
    /// Build a snapshot from config and session state
    pub fn capture(config: &MacroConfig, session: &SessionState) -> Self {
        Self {
            calibration_flag: session.calibration_flag,
            default_extruder_temp: config.default_extruder_temp,
            default_bed_temp: config.default_bed_temp,
            g28_ext_temp: session.g28_ext_temp,
            quiet_mode_flag: session.quiet_mode_flag,
        }
    }
}

/// Last committed status, readable from any execution context
///
/// The registry publishes a whole snapshot after each macro, so readers
/// never see a half-applied update. Reads only take the blocking mutex for
/// the duration of a copy.
pub struct StatusBoard<M: RawMutex> {
    status: Mutex<M, Cell<MacroStatus>>,
}

impl<M: RawMutex> StatusBoard<M> {
    /// Create a board holding an initial snapshot
    pub const fn new(initial: MacroStatus) -> Self {
        Self {
            status: Mutex::new(Cell::new(initial)),
        }
    }

    /// Replace the published snapshot
    pub fn publish(&self, status: MacroStatus) {
        self.status.lock(|cell| cell.set(status));
    }

    /// Get the last published snapshot
    pub fn get(&self) -> MacroStatus {
        self.status.lock(|cell| cell.get())
    }
}
