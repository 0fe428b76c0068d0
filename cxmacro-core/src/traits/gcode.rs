//! G-code dispatcher traits

use core::fmt;

/// Errors reported by the G-code dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GcodeError {
    /// The dispatcher refused or failed to run the script
    Rejected,
    /// A formatted script did not fit the line buffer
    LineTooLong,
}

impl fmt::Display for GcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcodeError::Rejected => f.write_str("script rejected by dispatcher"),
            GcodeError::LineTooLong => f.write_str("script line too long"),
        }
    }
}

/// Sink for scripts and operator messages
///
/// Implemented by the host G-code dispatcher. Scripts run synchronously:
/// `run_script` returns once the command has been queued or executed.
pub trait GcodeSink {
    /// Run a single G-code line (e.g. `G28 X Y`)
    fn run_script(&mut self, script: &str) -> Result<(), GcodeError>;

    /// Send a human-readable status line to the operator
    fn respond_info(&mut self, msg: &str);
}

/// Registration side of the dispatcher
pub trait CommandRegistrar {
    /// Expose `name` as an external command with a one-line description
    fn register_command(&mut self, name: &'static str, description: &'static str)
        -> Result<(), GcodeError>;
}
