//! High-water mark persistence
//!
//! The engine only ever needs one number across sessions: the best P&L.
//! Stores are best-effort. A missing or failing store must never affect a
//! run; the in-memory mark stays authoritative for the session.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors a store may report. The engine logs and ignores them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store record malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable")]
    Unavailable,
}

/// Get/set capability for the persisted high-water mark
pub trait HighScoreStore {
    /// The stored mark, or None if absent or unreadable
    fn load(&self) -> Option<f64>;

    /// Persist a new mark
    fn save(&mut self, value: f64) -> Result<(), StoreError>;
}

/// In-process store (tests, or hosts without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: f64) -> Self {
        Self { value: Some(value) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<f64> {
        self.value
    }

    fn save(&mut self, value: f64) -> Result<(), StoreError> {
        self.value = Some(value);
        Ok(())
    }
}

/// A store that remembers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl HighScoreStore for NullStore {
    fn load(&self) -> Option<f64> {
        None
    }

    fn save(&mut self, _value: f64) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Serialized form shared by the file and LocalStorage stores
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
struct HighWaterRecord {
    high_water: f64,
}

impl HighWaterRecord {
    fn parse(json: &str) -> Result<f64, StoreError> {
        let record: HighWaterRecord = serde_json::from_str(json)?;
        Ok(record.high_water)
    }

    fn encode(high_water: f64) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&HighWaterRecord { high_water })?)
    }
}
