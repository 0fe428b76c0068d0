//! Speed-mode record on the filesystem

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use cxmacro_core::traits::{SpeedModeRecord, SpeedModeStore, StoreError};

/// Writes the speed-mode record as a small JSON document
///
/// Each write truncates the file, so the print job only ever sees the
/// latest record.
#[derive(Debug, Clone)]
pub struct JsonSpeedModeStore {
    path: PathBuf,
}

impl JsonSpeedModeStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpeedModeStore for JsonSpeedModeStore {
    fn write_record(&mut self, record: &SpeedModeRecord) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec(record).map_err(|e| {
            log::error!("encoding speed mode record: {}", e);
            StoreError::Encode
        })?;

        let io_err = |e: std::io::Error| {
            log::error!("writing {}: {}", self.path.display(), e);
            StoreError::Io
        };

        let mut file = File::create(&self.path).map_err(io_err)?;
        file.write_all(&encoded).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        log::debug!("speed mode {} written to {}", record.speed_mode, self.path.display());
        Ok(())
    }
}
