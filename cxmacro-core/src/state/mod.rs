//! Session state shared across macro invocations
//!
//! The registry owns one `SessionState` for the lifetime of the host.
//! Telemetry reads it through `MacroStatus` snapshots.

pub mod session;
pub mod status;

pub use session::SessionState;
pub use status::{MacroStatus, StatusBoard};
