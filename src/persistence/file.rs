//! JSON file store for native builds

use std::path::{Path, PathBuf};

use super::{HighScoreStore, HighWaterRecord, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<f64, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        HighWaterRecord::parse(&json)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Option<f64> {
        match self.read() {
            Ok(value) => {
                log::info!("Loaded high-water mark {value:.2} from {}", self.path.display());
                Some(value)
            }
            Err(err) => {
                log::debug!("No high-water mark at {}: {err}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, value: f64) -> Result<(), StoreError> {
        let json = HighWaterRecord::encode(value)?;
        // Write beside the target then rename, so a crash never leaves a torn file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High-water mark saved ({value:.2})");
        Ok(())
    }
}
