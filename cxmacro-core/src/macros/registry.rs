//! Macro registry
//!
//! Holds the validated configuration, the session state and the heat-wait
//! coordinator, and routes dispatcher calls to the macro operations.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::{ConfigError, MacroConfig};
use crate::heatwait::{AbortReason, HeatSignal, HeatWaitCoordinator};
use crate::state::{MacroStatus, SessionState, StatusBoard};
use crate::traits::{
    CommandRegistrar, GcodeSink, HeaterBus, PrintStatus, ProbeCapability, ProbeVariant,
    SpeedModeStore,
};

use super::table::{register_all, MacroId, MACRO_NAMES};
use super::{MacroError, MacroParams};

/// How a macro finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroReport {
    /// The macro ran to the end
    Completed,
    /// The macro is disabled by configuration and did nothing
    Skipped,
    /// The heat wait ended without the target; dependent moves were not run
    NotCompleted(AbortReason),
}

/// Collaborators available to a macro invocation
///
/// Built by the host for each dispatch. `delay` only measures the optional
/// heat-wait bound.
pub struct MacroContext<'a, M: RawMutex, D: DelayNs> {
    pub gcode: &'a mut dyn GcodeSink,
    pub heaters: &'a mut dyn HeaterBus,
    pub heat_signal: &'a HeatSignal<M>,
    pub probe: &'a mut dyn ProbeCapability,
    pub print_status: Option<&'a dyn PrintStatus>,
    pub speed_mode: Option<&'a mut dyn SpeedModeStore>,
    pub status_board: Option<&'a StatusBoard<M>>,
    pub delay: D,
}

/// Macro registry and session owner
#[derive(Debug, Clone)]
pub struct Registry {
    pub(super) config: MacroConfig,
    pub(super) session: SessionState,
    pub(super) coordinator: HeatWaitCoordinator,
    pub(super) probe: Option<ProbeVariant>,
}

impl Registry {
    /// Validate `config` and create a fresh session
    pub fn new(config: MacroConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            session: SessionState::new(&config),
            coordinator: HeatWaitCoordinator::new(config.heat_timeout_ms),
            probe: None,
            config,
        })
    }

    /// Expose every macro to the dispatcher
    pub fn register_commands(&self, registrar: &mut dyn CommandRegistrar) -> Result<usize, ConfigError> {
        register_all(registrar, &MACRO_NAMES)
    }

    /// Get the validated configuration
    pub fn config(&self) -> &MacroConfig {
        &self.config
    }

    /// Get the session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get the heat-wait coordinator
    pub fn coordinator(&self) -> &HeatWaitCoordinator {
        &self.coordinator
    }

    /// Snapshot for telemetry
    pub fn status(&self) -> MacroStatus {
        MacroStatus::capture(&self.config, &self.session)
    }

    /// Run the macro registered as `name`
    ///
    /// Rejected parameters leave the session untouched. The status board,
    /// if any, receives a fresh snapshot after every call.
    pub async fn dispatch<M: RawMutex, D: DelayNs>(
        &mut self,
        name: &str,
        params: &MacroParams<'_>,
        ctx: &mut MacroContext<'_, M, D>,
    ) -> Result<MacroReport, MacroError> {
        let id = MacroId::from_name(name).ok_or(MacroError::UnknownCommand)?;
        debug!("dispatching {}", id.name());

        let result = match id {
            MacroId::LevelingCalibration => self.leveling_calibration(params, &mut *ctx.gcode),
            MacroId::CleanCalibrationFlags => Ok(self.clean_calibration_flags()),
            MacroId::DrawOneLine => self.draw_one_line(params, ctx).await,
            MacroId::RoughG28 => self.rough_g28(params, &mut *ctx.gcode, &mut *ctx.probe),
            MacroId::NozzleClear => self.nozzle_clear(&mut *ctx.gcode),
            MacroId::SetQuietMode => self.set_quiet_mode(
                params,
                &mut *ctx.gcode,
                ctx.print_status,
                ctx.speed_mode.as_deref_mut(),
            ),
        };

        if let Err(e) = &result {
            warn!("{} failed: {:?}", id.name(), e);
        }
        if let Some(board) = ctx.status_board {
            board.publish(self.status());
        }

        result
    }
}
