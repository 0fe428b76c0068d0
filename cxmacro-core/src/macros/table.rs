//! Static macro table
//!
//! Maps each external command name to its handler and description. The
//! dispatcher only ever sees names; the registry matches on [`MacroId`].

use crate::config::ConfigError;
use crate::traits::CommandRegistrar;

/// Command names exposed to the dispatcher, in registration order
pub const MACRO_NAMES: [&str; 6] = [
    "CX_PRINT_LEVELING_CALIBRATION",
    "CX_CLEAN_CALIBRATION_FLAGS",
    "CX_PRINT_DRAW_ONE_LINE",
    "CX_ROUGH_G28",
    "CX_NOZZLE_CLEAR",
    "SET_QMODE_FLAG",
];

/// Macro handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroId {
    LevelingCalibration,
    CleanCalibrationFlags,
    DrawOneLine,
    RoughG28,
    NozzleClear,
    SetQuietMode,
}

impl MacroId {
    /// All handlers
    pub const ALL: [MacroId; 6] = [
        MacroId::LevelingCalibration,
        MacroId::CleanCalibrationFlags,
        MacroId::DrawOneLine,
        MacroId::RoughG28,
        MacroId::NozzleClear,
        MacroId::SetQuietMode,
    ];

    /// External command name
    pub fn name(self) -> &'static str {
        match self {
            MacroId::LevelingCalibration => "CX_PRINT_LEVELING_CALIBRATION",
            MacroId::CleanCalibrationFlags => "CX_CLEAN_CALIBRATION_FLAGS",
            MacroId::DrawOneLine => "CX_PRINT_DRAW_ONE_LINE",
            MacroId::RoughG28 => "CX_ROUGH_G28",
            MacroId::NozzleClear => "CX_NOZZLE_CLEAR",
            MacroId::SetQuietMode => "SET_QMODE_FLAG",
        }
    }

    /// One-line description shown to operators
    pub fn description(self) -> &'static str {
        match self {
            MacroId::LevelingCalibration => {
                "Run bed mesh calibration. EXTRUDER_TEMP (180-320), BED_TEMP (0-130), CALIBRATION (0 or 1)"
            }
            MacroId::CleanCalibrationFlags => "Clean calibration flags",
            MacroId::DrawOneLine => "Draw primer line before printing",
            MacroId::RoughG28 => "Rough G28 with reduced hotend temperature",
            MacroId::NozzleClear => "Nozzle clear with temperature",
            MacroId::SetQuietMode => "Set quiet mode flag. FLAG (0 or 1)",
        }
    }

    /// Look up a handler by command name (case-insensitive)
    pub fn from_name(name: &str) -> Option<MacroId> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

/// Register `names` with the dispatcher
///
/// Every name must have a handler; a missing one aborts startup.
/// Returns the number of registered commands.
pub fn register_all(
    registrar: &mut dyn CommandRegistrar,
    names: &[&'static str],
) -> Result<usize, ConfigError> {
    for &name in names {
        let id = MacroId::from_name(name).ok_or(ConfigError::MissingHandler(name))?;
        registrar
            .register_command(name, id.description())
            .map_err(|_| ConfigError::RegistrationRefused(name))?;
        debug!("registered {}", name);
    }
    info!("registered {} macros", names.len());
    Ok(names.len())
}
