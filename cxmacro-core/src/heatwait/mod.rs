//! Heat-wait coordination
//!
//! A macro that needs a hot nozzle asks the heater owner for a target, then
//! suspends until the owner reports the target reached or the wait is
//! aborted. The owner and the macro share only a [`HeatSignal`].

pub mod coordinator;
pub mod machine;
pub mod signal;

pub use coordinator::{HeatOutcome, HeatWaitCoordinator};
pub use machine::{AbortReason, WaitEvent, WaitPhase};
pub use signal::{HeatSignal, SignalState};
