//! Macro parameter parsing
//!
//! Parameters use the extended G-code form `NAME KEY=VALUE KEY=VALUE`.
//! Keys are matched case-insensitively. Values are parsed on access, so a
//! macro validates everything it needs before touching any state.

use crate::config::TempRange;

use super::MacroError;

/// Parameters of one macro invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroParams<'a> {
    args: &'a str,
}

impl<'a> MacroParams<'a> {
    /// Wrap the argument part of a command line
    pub fn new(args: &'a str) -> Self {
        Self { args }
    }

    /// Split a full command line into command name and parameters
    pub fn split_command(line: &'a str) -> (&'a str, Self) {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some((name, args)) => (name, Self::new(args)),
            None => (line, Self::new("")),
        }
    }

    /// Get the raw value of `key`
    ///
    /// The last occurrence wins if a key is repeated.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.args
            .split_whitespace()
            .filter_map(|pair| pair.split_once('='))
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
            .last()
    }

    /// Get an optional float, validated against `range`
    pub fn get_float_opt(
        &self,
        key: &'static str,
        range: TempRange,
    ) -> Result<Option<f32>, MacroError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        let value: f32 = raw
            .parse()
            .map_err(|_| MacroError::InvalidParameter { param: key })?;
        if !range.contains(value) {
            return Err(MacroError::OutOfRange {
                param: key,
                value,
                min: range.min,
                max: range.max,
            });
        }
        Ok(Some(value))
    }

    /// Get a float with a default, validated against `range`
    ///
    /// The default is assumed valid (it comes from a validated config).
    pub fn get_float(
        &self,
        key: &'static str,
        default: f32,
        range: TempRange,
    ) -> Result<f32, MacroError> {
        Ok(self.get_float_opt(key, range)?.unwrap_or(default))
    }

    /// Get a 0/1 flag with a default
    pub fn get_flag(&self, key: &'static str, default: u8) -> Result<u8, MacroError> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        let value: i32 = raw
            .parse()
            .map_err(|_| MacroError::InvalidParameter { param: key })?;
        match value {
            0 | 1 => Ok(value as u8),
            _ => Err(MacroError::OutOfRange {
                param: key,
                value: value as f32,
                min: 0.0,
                max: 1.0,
            }),
        }
    }
}
