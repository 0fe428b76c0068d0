//! Leveling calibration, flag cleanup and nozzle clear

use crate::config::{BED_TEMP_RANGE, EXTRUDER_TEMP_RANGE, NOZZLE_CLEAR_MARGIN};
use crate::traits::GcodeSink;

use super::script::{run_fmt, whole};
use super::{MacroError, MacroParams, MacroReport, Registry};

impl Registry {
    /// `CX_PRINT_LEVELING_CALIBRATION`
    ///
    /// Sets the calibration flag and hands over to the bed mesh check.
    /// Explicit temperatures are remembered for later macros.
    pub(super) fn leveling_calibration(
        &mut self,
        params: &MacroParams<'_>,
        gcode: &mut dyn GcodeSink,
    ) -> Result<MacroReport, MacroError> {
        let extruder = params.get_float_opt("EXTRUDER_TEMP", EXTRUDER_TEMP_RANGE)?;
        let bed = params.get_float_opt("BED_TEMP", BED_TEMP_RANGE)?;
        let calibration = params.get_flag("CALIBRATION", 1)?;

        if extruder.is_some() {
            self.session.extruder_temp = extruder;
        }
        if bed.is_some() {
            self.session.bed_temp = bed;
        }
        self.session.calibration_flag = calibration;

        gcode.run_script("CHECK_BED_MESH AUTO_G29=1")?;
        Ok(MacroReport::Completed)
    }

    /// `CX_CLEAN_CALIBRATION_FLAGS`
    pub(super) fn clean_calibration_flags(&mut self) -> MacroReport {
        self.session.calibration_flag = 0;
        MacroReport::Completed
    }

    /// `CX_NOZZLE_CLEAR`
    ///
    /// Needs the print temperatures resolved by an earlier macro; there is
    /// no default for the upper bound.
    pub(super) fn nozzle_clear(&mut self, gcode: &mut dyn GcodeSink) -> Result<MacroReport, MacroError> {
        let (extruder, bed) = self.session.resolved_temps().ok_or(MacroError::Precondition(
            "print temperatures not resolved in this session",
        ))?;

        if !self.config.nozzle_clear {
            gcode.respond_info("CX_NOZZLE_CLEAR: disabled by configuration");
            return Ok(MacroReport::Skipped);
        }

        gcode.respond_info("Running macro: CX_NOZZLE_CLEAR");
        run_fmt(
            gcode,
            format_args!(
                "NOZZLE_CLEAR HOT_MIN_TEMP={} HOT_MAX_TEMP={} BED_MAX_TEMP={}",
                whole(self.session.g28_ext_temp),
                whole(extruder - NOZZLE_CLEAR_MARGIN),
                whole(bed)
            ),
        )?;
        gcode.respond_info("Macro FINISHED: CX_NOZZLE_CLEAR");
        Ok(MacroReport::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::testing::*;
    use super::*;
    use crate::config::MacroConfig;

    #[test]
    fn test_leveling_sets_flag_and_runs_mesh_check() {
        let mut registry = Registry::new(MacroConfig::default()).unwrap();
        let mut gcode = RecordingGcode::default();

        let report = registry.leveling_calibration(&MacroParams::default(), &mut gcode);

        assert_eq!(report, Ok(MacroReport::Completed));
        assert_eq!(registry.status().calibration_flag, 1);
        assert_eq!(gcode.scripts, ["CHECK_BED_MESH AUTO_G29=1"]);
        assert_eq!(registry.session().extruder_temp, None);
    }

    #[test]
    fn test_leveling_remembers_explicit_temps() {
        let mut registry = Registry::new(MacroConfig::default()).unwrap();
        let mut gcode = RecordingGcode::default();

        registry
            .leveling_calibration(
                &MacroParams::new("EXTRUDER_TEMP=250 BED_TEMP=70 CALIBRATION=0"),
                &mut gcode,
            )
            .unwrap();

        assert_eq!(registry.session().resolved_temps(), Some((250.0, 70.0)));
        assert_eq!(registry.status().calibration_flag, 0);
    }

    #[test]
    fn test_leveling_rejects_without_mutation() {
        let mut registry = Registry::new(MacroConfig::default()).unwrap();
        let mut gcode = RecordingGcode::default();

        let report = registry.leveling_calibration(
            &MacroParams::new("EXTRUDER_TEMP=250 BED_TEMP=200"),
            &mut gcode,
        );

        assert!(matches!(
            report,
            Err(MacroError::OutOfRange { param: "BED_TEMP", .. })
        ));
        assert_eq!(registry.session().extruder_temp, None);
        assert_eq!(registry.status().calibration_flag, 0);
        assert!(gcode.scripts.is_empty());
    }

    #[test]
    fn test_clean_flags_is_idempotent() {
        let mut registry = Registry::new(MacroConfig {
            calibration: 1,
            ..MacroConfig::default()
        })
        .unwrap();
        assert_eq!(registry.status().calibration_flag, 1);

        registry.clean_calibration_flags();
        assert_eq!(registry.status().calibration_flag, 0);
        registry.clean_calibration_flags();
        assert_eq!(registry.status().calibration_flag, 0);
    }

    #[test]
    fn test_nozzle_clear_requires_resolved_temps() {
        let mut registry = Registry::new(MacroConfig::default()).unwrap();
        let mut gcode = RecordingGcode::default();

        let report = registry.nozzle_clear(&mut gcode);

        assert!(matches!(report, Err(MacroError::Precondition(_))));
        assert!(gcode.scripts.is_empty());
    }

    #[test]
    fn test_nozzle_clear_with_resolved_temps() {
        let mut registry = Registry::new(MacroConfig::default()).unwrap();
        let mut gcode = RecordingGcode::default();
        registry.session.resolve_extruder_temp(Some(230.5), 220.0);
        registry.session.resolve_bed_temp(Some(60.0), 50.0);

        let report = registry.nozzle_clear(&mut gcode);

        assert_eq!(report, Ok(MacroReport::Completed));
        assert_eq!(
            gcode.scripts,
            ["NOZZLE_CLEAR HOT_MIN_TEMP=200 HOT_MAX_TEMP=210 BED_MAX_TEMP=60"]
        );
    }

    #[test]
    fn test_nozzle_clear_disabled() {
        let mut registry = Registry::new(MacroConfig {
            nozzle_clear: false,
            ..MacroConfig::default()
        })
        .unwrap();
        let mut gcode = RecordingGcode::default();
        registry.session.resolve_extruder_temp(None, 220.0);
        registry.session.resolve_bed_temp(None, 50.0);

        assert_eq!(registry.nozzle_clear(&mut gcode), Ok(MacroReport::Skipped));
        assert!(gcode.scripts.is_empty());
    }
}
