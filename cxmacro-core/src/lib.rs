//! Board-agnostic printer preparation macros
//!
//! This crate contains the logic behind the Creality-style preparation
//! macros and does not depend on a specific host or MCU:
//!
//! - Collaborator traits (G-code dispatcher, heaters, probe, print status)
//! - Macro configuration and session state
//! - Heat-wait signal, state machine and coordinator
//! - Static macro table and the macro operations themselves

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("You may not enable both `defmt` and `log` features.");

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod heatwait;
pub mod macros;
pub mod state;
pub mod traits;
