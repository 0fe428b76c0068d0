//! Cross-invocation session state

use crate::config::MacroConfig;

/// State that survives from one macro invocation to the next
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionState {
    /// Bed leveling calibration requested (0 or 1)
    pub calibration_flag: u8,
    /// Quiet (reduced speed) mode requested (0 or 1)
    pub quiet_mode_flag: u8,
    /// Last resolved extruder target (°C)
    pub extruder_temp: Option<f32>,
    /// Last resolved bed target (°C)
    pub bed_temp: Option<f32>,
    /// Extruder ceiling while homing (°C)
    pub g28_ext_temp: f32,
}

impl SessionState {
    /// Create the initial session from a validated config
    pub fn new(config: &MacroConfig) -> Self {
        Self {
            calibration_flag: config.calibration,
            quiet_mode_flag: 0,
            extruder_temp: None,
            bed_temp: None,
            g28_ext_temp: config.g28_ext_temp,
        }
    }

    /// Resolve the extruder target and remember it
    ///
    /// An explicit value wins, then the cached session value, then the
    /// configured default. The caller validates `explicit` beforehand.
    pub fn resolve_extruder_temp(&mut self, explicit: Option<f32>, default: f32) -> f32 {
        let temp = explicit.or(self.extruder_temp).unwrap_or(default);
        self.extruder_temp = Some(temp);
        temp
    }

    /// Resolve the bed target and remember it
    ///
    /// Same precedence as [`SessionState::resolve_extruder_temp`].
    pub fn resolve_bed_temp(&mut self, explicit: Option<f32>, default: f32) -> f32 {
        let temp = explicit.or(self.bed_temp).unwrap_or(default);
        self.bed_temp = Some(temp);
        temp
    }

    /// Both temperatures, if an earlier macro has resolved them
    pub fn resolved_temps(&self) -> Option<(f32, f32)> {
        Some((self.extruder_temp?, self.bed_temp?))
    }
}
