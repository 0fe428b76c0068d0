//! Printer preparation macros
//!
//! The [`Registry`] owns configuration and session state and runs one macro
//! at a time on behalf of the dispatcher.

pub mod error;
pub mod params;
pub mod registry;
pub mod table;

mod calibration;
mod draw_line;
mod homing;
mod quiet_mode;
mod script;

pub use draw_line::{PRIME_POSITION_SEQUENCE, PURGE_LINE_SEQUENCE};
pub use error::MacroError;
pub use params::MacroParams;
pub use registry::{MacroContext, MacroReport, Registry};
pub use table::{register_all, MacroId, MACRO_NAMES};
