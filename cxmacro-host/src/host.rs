//! Blocking macro host

use std::sync::Arc;

use cxmacro_core::config::ConfigError;
use cxmacro_core::macros::{MacroContext, MacroError, MacroParams, MacroReport, Registry};
use cxmacro_core::traits::{
    CommandRegistrar, GcodeSink, HeaterBus, PrintStatus, ProbeCapability, SpeedModeStore,
};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

use crate::config::HostConfig;
use crate::delay::TokioDelay;
use crate::{SharedHeatSignal, SharedStatusBoard};

/// Errors while starting the macro host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid macro configuration: {0}")]
    Config(ConfigError),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<ConfigError> for HostError {
    fn from(err: ConfigError) -> Self {
        HostError::Config(err)
    }
}

/// Per-call collaborators supplied by the host process
pub struct HostIo<'a> {
    pub gcode: &'a mut dyn GcodeSink,
    pub heaters: &'a mut dyn HeaterBus,
    pub probe: &'a mut dyn ProbeCapability,
    pub print_status: Option<&'a dyn PrintStatus>,
    pub speed_mode: Option<&'a mut dyn SpeedModeStore>,
}

/// Owns the macro registry together with the shared heat signal and
/// status board
///
/// Commands run one at a time on the calling thread. The heater owner
/// updates the signal from its own thread through [`MacroHost::heat_signal`];
/// each update wakes the parked macro thread.
pub struct MacroHost {
    registry: Registry,
    heat_signal: Arc<SharedHeatSignal>,
    status: Arc<SharedStatusBoard>,
    runtime: Runtime,
}

impl MacroHost {
    /// Create a host from a loaded configuration
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let registry = Registry::new(config.custom_macro)?;
        let status = Arc::new(SharedStatusBoard::new(registry.status()));
        let runtime = Builder::new_current_thread().enable_time().build()?;
        log::info!(
            "macro host ready (heat wait bound: {:?} ms)",
            registry.coordinator().timeout_ms()
        );
        Ok(Self {
            registry,
            heat_signal: Arc::new(SharedHeatSignal::new()),
            status,
            runtime,
        })
    }

    /// Register every macro with the dispatcher
    pub fn register(&self, registrar: &mut dyn CommandRegistrar) -> Result<usize, ConfigError> {
        self.registry.register_commands(registrar)
    }

    /// Handle for the heater owner
    pub fn heat_signal(&self) -> Arc<SharedHeatSignal> {
        Arc::clone(&self.heat_signal)
    }

    /// Handle for telemetry readers
    pub fn status_board(&self) -> Arc<SharedStatusBoard> {
        Arc::clone(&self.status)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run a command line such as `CX_ROUGH_G28 EXTRUDER_TEMP=240`
    ///
    /// Blocks the calling thread for the whole macro. During a heat wait the
    /// thread is parked until the heat signal changes or the wait bound
    /// expires. Must not be called from inside another async runtime.
    pub fn run_line<'a>(&'a mut self, line: &str, io: HostIo<'a>) -> Result<MacroReport, MacroError> {
        let (name, params) = MacroParams::split_command(line);

        let mut ctx = MacroContext {
            gcode: io.gcode,
            heaters: io.heaters,
            heat_signal: &*self.heat_signal,
            probe: io.probe,
            print_status: io.print_status,
            speed_mode: io.speed_mode,
            status_board: Some(&*self.status),
            delay: TokioDelay,
        };

        self.runtime
            .block_on(self.registry.dispatch(name, &params, &mut ctx))
    }
}
