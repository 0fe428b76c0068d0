//! std host glue for the preparation macros
//!
//! Wires [`cxmacro_core`] into a Klipper-style host process:
//!
//! - TOML configuration (`[custom_macro]`, `[speed_mode]`)
//! - JSON speed-mode record on the filesystem
//! - Thread-safe heat signal and status board
//! - Blocking dispatch for hosts without an async executor

pub mod config;
pub mod delay;
pub mod host;
pub mod speed_mode;

use cxmacro_core::heatwait::HeatSignal;
use cxmacro_core::state::StatusBoard;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use config::{HostConfig, HostConfigError, SpeedModeConfig};
pub use delay::TokioDelay;
pub use host::{HostError, HostIo, MacroHost};
pub use speed_mode::JsonSpeedModeStore;

/// Heat signal shared between the heater thread and the macro thread
pub type SharedHeatSignal = HeatSignal<CriticalSectionRawMutex>;

/// Status board readable from any thread
pub type SharedStatusBoard = StatusBoard<CriticalSectionRawMutex>;
