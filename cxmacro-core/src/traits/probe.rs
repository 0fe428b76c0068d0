//! Bed probe capability
//!
//! K1-class printers ship one of two strain-gauge probe modules. Both can
//! limit the minimum hotend temperature used while probing; which one is
//! present is discovered by asking, not by type.

use core::fmt;

/// Known probe modules, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeVariant {
    /// `prtouch_v2`
    PrTouchV2,
    /// `prtouch`
    PrTouch,
}

impl ProbeVariant {
    /// Variants in lookup order
    pub const PREFERENCE: [ProbeVariant; 2] = [ProbeVariant::PrTouchV2, ProbeVariant::PrTouch];

    /// Host object name of the variant
    pub fn object_name(self) -> &'static str {
        match self {
            ProbeVariant::PrTouchV2 => "prtouch_v2",
            ProbeVariant::PrTouch => "prtouch",
        }
    }

    /// Pick the first variant the probe supports
    pub fn resolve(probe: &dyn ProbeCapability) -> Option<ProbeVariant> {
        Self::PREFERENCE
            .into_iter()
            .find(|variant| probe.supports_min_temp(*variant))
    }
}

/// Errors from probe configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeError {
    /// The probe refused the temperature
    Rejected,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Rejected => f.write_str("probe rejected minimum temperature"),
        }
    }
}

/// Probe collaborator
pub trait ProbeCapability {
    /// Check if `variant` is present and accepts a minimum hotend temperature
    fn supports_min_temp(&self, variant: ProbeVariant) -> bool;

    /// Set the minimum hotend temperature used while probing
    fn set_hot_min_temp(&mut self, variant: ProbeVariant, temp_c: f32) -> Result<(), ProbeError>;
}
