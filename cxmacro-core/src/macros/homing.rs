//! Rough homing with a reduced hotend temperature

use crate::config::{BED_TEMP_RANGE, EXTRUDER_TEMP_RANGE, G28_EXT_TEMP_MAX};
use crate::traits::{GcodeSink, ProbeCapability, ProbeVariant};

use super::script::{respond_fmt, run_all, run_fmt, whole};
use super::{MacroError, MacroParams, MacroReport, Registry};

impl Registry {
    /// `CX_ROUGH_G28`
    ///
    /// Homes with the hotend held at the homing ceiling so the probe does
    /// not touch the bed with a dripping nozzle. Also resolves the print
    /// temperatures and the calibration flag for the macros that follow.
    pub(super) fn rough_g28(
        &mut self,
        params: &MacroParams<'_>,
        gcode: &mut dyn GcodeSink,
        probe: &mut dyn ProbeCapability,
    ) -> Result<MacroReport, MacroError> {
        let extruder = params.get_float_opt("EXTRUDER_TEMP", EXTRUDER_TEMP_RANGE)?;
        let bed = params.get_float_opt("BED_TEMP", BED_TEMP_RANGE)?;
        let calibration = params.get_flag("LEVELING_CALIBRATION", 1)?;
        let variant = self.probe_variant(probe)?;

        gcode.respond_info("Running macro: CX_ROUGH_G28");

        let g28_ext_temp = self.session.g28_ext_temp.min(G28_EXT_TEMP_MAX);
        self.session.g28_ext_temp = g28_ext_temp;
        respond_fmt(gcode, format_args!("CX_ROUGH_G28: g28_ext_temp = {}", g28_ext_temp));

        if variant == ProbeVariant::PrTouch {
            gcode.respond_info("CX_ROUGH_G28: prtouch (not v2)");
        }
        probe.set_hot_min_temp(variant, g28_ext_temp)?;

        self.session
            .resolve_extruder_temp(extruder, self.config.default_extruder_temp);
        let bed = self
            .session
            .resolve_bed_temp(bed, self.config.default_bed_temp);
        self.session.calibration_flag = calibration;

        run_fmt(gcode, format_args!("M104 S{}", whole(g28_ext_temp)))?;
        run_fmt(gcode, format_args!("M140 S{}", whole(bed)))?;
        run_all(gcode, &["M204 S500", "G28"])?;

        gcode.respond_info("Macro FINISHED: CX_ROUGH_G28");
        Ok(MacroReport::Completed)
    }

    /// Find the probe variant, resolving it on first use
    fn probe_variant(&mut self, probe: &dyn ProbeCapability) -> Result<ProbeVariant, MacroError> {
        if let Some(variant) = self.probe {
            return Ok(variant);
        }
        let variant =
            ProbeVariant::resolve(probe).ok_or(MacroError::MissingDependency("prtouch_v2 or prtouch"))?;
        info!("using probe {}", variant.object_name());
        self.probe = Some(variant);
        Ok(variant)
    }
}
