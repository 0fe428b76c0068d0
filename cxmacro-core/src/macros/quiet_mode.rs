//! Quiet mode flag and speed-mode record

use crate::traits::{GcodeSink, PrintStatus, SpeedModeRecord, SpeedModeStore};

use super::script::respond_fmt;
use super::{MacroError, MacroParams, MacroReport, Registry};

impl Registry {
    /// `SET_QMODE_FLAG`
    ///
    /// Setting the flag during a print also writes the quiet speed-mode
    /// record for the print job. Persisting is best effort and never fails
    /// the command.
    pub(super) fn set_quiet_mode(
        &mut self,
        params: &MacroParams<'_>,
        gcode: &mut dyn GcodeSink,
        print_status: Option<&dyn PrintStatus>,
        store: Option<&mut (dyn SpeedModeStore + '_)>,
    ) -> Result<MacroReport, MacroError> {
        let flag = params.get_flag("FLAG", 1)?;
        self.session.quiet_mode_flag = flag;
        respond_fmt(gcode, format_args!("SET_QMODE_FLAG: qmode_flag={}", flag));

        if flag == 1 {
            persist_quiet_mode(print_status, store);
        }
        Ok(MacroReport::Completed)
    }
}

fn persist_quiet_mode(print_status: Option<&dyn PrintStatus>, store: Option<&mut (dyn SpeedModeStore + '_)>) {
    let (Some(print_status), Some(store)) = (print_status, store) else {
        error!("SET_QMODE_FLAG: print status or speed mode store unavailable");
        return;
    };

    if !print_status.is_printing() {
        return;
    }

    match store.write_record(&SpeedModeRecord::QUIET) {
        Ok(()) => info!("speed mode record written"),
        Err(e) => error!("SET_QMODE_FLAG: {:?}", e),
    }
}
