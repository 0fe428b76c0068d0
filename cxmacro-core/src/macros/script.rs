//! Formatting helpers for scripts and responses

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::{GcodeError, GcodeSink};

use super::MacroError;

/// Longest script line a macro formats
const SCRIPT_LEN: usize = 96;

/// Longest response line; longer responses are truncated
const RESPONSE_LEN: usize = 160;

/// Format and run a single script line
pub(crate) fn run_fmt(gcode: &mut dyn GcodeSink, args: fmt::Arguments<'_>) -> Result<(), MacroError> {
    let mut line: String<SCRIPT_LEN> = String::new();
    line.write_fmt(args).map_err(|_| GcodeError::LineTooLong)?;
    gcode.run_script(&line)?;
    Ok(())
}

/// Run fixed script lines in order
pub(crate) fn run_all(gcode: &mut dyn GcodeSink, scripts: &[&str]) -> Result<(), MacroError> {
    for script in scripts {
        gcode.run_script(script)?;
    }
    Ok(())
}

/// Format and send an operator response
pub(crate) fn respond_fmt(gcode: &mut dyn GcodeSink, args: fmt::Arguments<'_>) {
    let mut msg: String<RESPONSE_LEN> = String::new();
    // Overflow only truncates the message
    let _ = msg.write_fmt(args);
    gcode.respond_info(&msg);
}

/// Whole degrees as the dispatcher expects them in scripts
pub(crate) fn whole(temp_c: f32) -> i32 {
    temp_c as i32
}
