//! Collaborator traits
//!
//! These traits define the boundary between the macros and the rest of
//! the printer host: the G-code dispatcher, heaters, probe and print job.

pub mod gcode;
pub mod heater;
pub mod printer;
pub mod probe;

pub use gcode::{CommandRegistrar, GcodeError, GcodeSink};
pub use heater::{HeaterBus, HeaterError, HeaterId};
pub use printer::{PrintStatus, SpeedModeRecord, SpeedModeStore, StoreError};
pub use probe::{ProbeCapability, ProbeError, ProbeVariant};
