//! Purge line before the first print move

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::{BED_TEMP_RANGE, EXTRUDER_TEMP_RANGE};
use crate::heatwait::HeatOutcome;
use crate::traits::HeaterId;

use super::script::{respond_fmt, run_all, run_fmt, whole};
use super::{MacroContext, MacroError, MacroParams, MacroReport, Registry};

/// Moves to the purge start before heating
pub const PRIME_POSITION_SEQUENCE: [&str; 4] = [
    "G28 X Y",
    "M83",
    "G1 X10 Y10 Z2 F6000",
    "G1 Z0.1 F600",
];

/// Purge line, run only once the extruder is at temperature
pub const PURGE_LINE_SEQUENCE: [&str; 21] = [
    "G21",
    "G1 F2400 E-0.5",
    "SET_VELOCITY_LIMIT SQUARE_CORNER_VELOCITY=5",
    "M204 S12000",
    "SET_VELOCITY_LIMIT ACCEL_TO_DECEL=6000",
    "M220 S100",
    "M221 S100",
    "G1 Z2.0 F1200",
    "G1 X0.1 Y20 Z0.3 F6000.0",
    "G1 X0.1 Y180.0 Z0.3 F3000.0 E10.0",
    "G1 X0.4 Y180.0 Z0.3 F3000.0",
    "G1 X0.4 Y20.0 Z0.3 F3000.0 E10.0",
    "G1 Y10.0 F3000.0",
    "G1 Z2.0 F600.0",
    "G1 Z0.3 F600.0",
    "G1 Z2.0 F600.0",
    // Retract to reduce oozing
    "G1 F2400 E-0.5",
    "M82",
    "G92 E0",
    "G1 F12000",
    "G21",
];

impl Registry {
    /// `CX_PRINT_DRAW_ONE_LINE`
    ///
    /// Heats to print temperature and draws a purge line along the left
    /// edge. If the heat wait ends without the target, the line is skipped
    /// and the report says so.
    pub(super) async fn draw_one_line<M: RawMutex, D: DelayNs>(
        &mut self,
        params: &MacroParams<'_>,
        ctx: &mut MacroContext<'_, M, D>,
    ) -> Result<MacroReport, MacroError> {
        let explicit_extruder = params.get_float_opt("EXTRUDER_TEMP", EXTRUDER_TEMP_RANGE)?;
        let explicit_bed = params.get_float_opt("BED_TEMP", BED_TEMP_RANGE)?;

        ctx.gcode.respond_info("Running macro: CX_PRINT_DRAW_ONE_LINE");

        let extruder = self
            .session
            .resolve_extruder_temp(explicit_extruder, self.config.default_extruder_temp);
        let bed = self
            .session
            .resolve_bed_temp(explicit_bed, self.config.default_bed_temp);

        run_all(&mut *ctx.gcode, &PRIME_POSITION_SEQUENCE)?;
        run_fmt(&mut *ctx.gcode, format_args!("M104 S{}", whole(extruder)))?;
        run_fmt(&mut *ctx.gcode, format_args!("M140 S{}", whole(bed)))?;
        respond_fmt(
            &mut *ctx.gcode,
            format_args!(
                "CX_PRINT_DRAW_ONE_LINE: Waiting for printing temperature... (extruder={}, bed={})",
                extruder, bed
            ),
        );

        self.coordinator
            .request(&mut *ctx.heaters, HeaterId::Extruder, extruder)?;

        match self.coordinator.wait(ctx.heat_signal, &mut ctx.delay).await {
            HeatOutcome::Reached => {
                ctx.gcode
                    .respond_info("CX_PRINT_DRAW_ONE_LINE: Printing temperature achieved.");
                run_all(&mut *ctx.gcode, &PURGE_LINE_SEQUENCE)?;
                ctx.gcode.respond_info("Macro FINISHED: CX_PRINT_DRAW_ONE_LINE");
                Ok(MacroReport::Completed)
            }
            HeatOutcome::Aborted(reason) => {
                warn!("purge line skipped, heating {}", reason.as_str());
                respond_fmt(
                    &mut *ctx.gcode,
                    format_args!(
                        "Macro NOT COMPLETED: CX_PRINT_DRAW_ONE_LINE (heating {}, purge line skipped)",
                        reason.as_str()
                    ),
                );
                Ok(MacroReport::NotCompleted(reason))
            }
        }
    }
}
