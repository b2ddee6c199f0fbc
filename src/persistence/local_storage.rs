//! Browser LocalStorage store (WASM only)

use super::{HighScoreStore, HighWaterRecord, StoreError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "stockybird_highscore";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Option<f64> {
        let json = Self::storage()?.get_item(Self::STORAGE_KEY).ok().flatten()?;
        match HighWaterRecord::parse(&json) {
            Ok(value) => {
                log::info!("Loaded high-water mark {value:.2}");
                Some(value)
            }
            // Older saves stored the bare number
            Err(_) => json.trim().parse().ok(),
        }
    }

    fn save(&mut self, value: f64) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        let json = HighWaterRecord::encode(value)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("High-water mark saved ({value:.2})");
        Ok(())
    }
}
