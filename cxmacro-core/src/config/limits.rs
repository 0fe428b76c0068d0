//! Input ranges shared by configuration and macro parameters

/// Highest extruder temperature allowed while homing (°C)
pub const G28_EXT_TEMP_MAX: f32 = 200.0;

/// Amount subtracted from the print temperature for the nozzle-clear upper bound (°C)
pub const NOZZLE_CLEAR_MARGIN: f32 = 20.0;

/// Closed temperature interval in °C
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempRange {
    pub min: f32,
    pub max: f32,
}

impl TempRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if a value lies inside the range
    ///
    /// NaN is never contained.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted extruder print temperatures
pub const EXTRUDER_TEMP_RANGE: TempRange = TempRange::new(180.0, 320.0);

/// Accepted bed temperatures
pub const BED_TEMP_RANGE: TempRange = TempRange::new(0.0, 130.0);
