//! Data-driven game balance
//!
//! Every number the simulation uses lives here, grouped by system. Defaults
//! come from `crate::consts`; a JSON tuning file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Body motion and step sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub flap_impulse: f32,
    pub terminal_velocity: f32,
    pub max_dt: f32,
    pub stall_threshold: f32,
    pub death_spin_rate: f32,
    pub death_floor_margin: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            terminal_velocity: TERMINAL_VELOCITY,
            max_dt: MAX_DT,
            stall_threshold: STALL_THRESHOLD,
            death_spin_rate: DEATH_SPIN_RATE,
            death_floor_margin: DEATH_FLOOR_MARGIN,
        }
    }
}

/// Player hitbox and placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub lane_fraction: f32,
    pub rest_fraction: f32,
    pub bob_amplitude: f32,
    pub bob_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            lane_fraction: PLAYER_LANE,
            rest_fraction: PLAYER_REST,
            bob_amplitude: BOB_AMPLITUDE,
            bob_speed: BOB_SPEED,
        }
    }
}

/// Gate geometry, spawning and difficulty curves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateTuning {
    pub pipe_width: f32,
    pub gap_initial: f32,
    pub gap_floor: f32,
    pub gap_shrink: f32,
    pub speed_initial: f32,
    pub speed_ceiling: f32,
    pub speed_rate: f32,
    pub spacing: f32,
    pub spawn_lead: f32,
    pub first_spawn_offset: f32,
    pub edge_margin: f32,
    pub price_initial: f64,
    pub price_drift: f64,
    pub price_spread: f64,
}

impl Default for GateTuning {
    fn default() -> Self {
        Self {
            pipe_width: PIPE_WIDTH,
            gap_initial: GAP_INITIAL,
            gap_floor: GAP_FLOOR,
            gap_shrink: GAP_SHRINK,
            speed_initial: SPEED_INITIAL,
            speed_ceiling: SPEED_CEILING,
            speed_rate: SPEED_RATE,
            spacing: GATE_SPACING,
            spawn_lead: SPAWN_LEAD,
            first_spawn_offset: FIRST_SPAWN_OFFSET,
            edge_margin: EDGE_MARGIN,
            price_initial: PRICE_INITIAL,
            price_drift: PRICE_DRIFT,
            price_spread: PRICE_SPREAD,
        }
    }
}

impl GateTuning {
    /// Gap size for a given trade count, never below the floor
    pub fn gap_for(&self, trades: u32) -> f32 {
        (self.gap_initial - self.gap_shrink * trades as f32).max(self.gap_floor)
    }

    /// Scroll speed for a given trade count, never above the ceiling
    pub fn speed_for(&self, trades: u32) -> f32 {
        (self.speed_initial + self.speed_rate * trades as f32).min(self.speed_ceiling)
    }
}

/// Profit/loss economy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub base_value: f64,
    pub wrong_penalty: f64,
    pub streak_bonus: f64,
    pub multiplier_cap: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_value: BASE_VALUE,
            wrong_penalty: WRONG_PENALTY,
            streak_bonus: STREAK_BONUS,
            multiplier_cap: MULTIPLIER_CAP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizTuning {
    pub lockout_ms: f32,
}

impl Default for QuizTuning {
    fn default() -> Self {
        Self {
            lockout_ms: LOCKOUT_MS,
        }
    }
}

/// Phase transitions and HUD-facing derived values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowTuning {
    pub restart_delay_ms: f32,
    pub pressure_span: f32,
}

impl Default for FlowTuning {
    fn default() -> Self {
        Self {
            restart_delay_ms: RESTART_DELAY_MS,
            pressure_span: PRESSURE_SPAN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailTuning {
    pub interval: f32,
    pub max_candles: usize,
    pub candle_width: f32,
}

impl Default for TrailTuning {
    fn default() -> Self {
        Self {
            interval: TRAIL_INTERVAL,
            max_candles: TRAIL_MAX_CANDLES,
            candle_width: TRAIL_CANDLE_WIDTH,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub gates: GateTuning,
    pub scoring: ScoringTuning,
    pub quiz: QuizTuning,
    pub flow: FlowTuning,
    pub trail: TrailTuning,
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject balance values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.physics.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if self.physics.flap_impulse >= 0.0 {
            return Err(TuningError::Invalid("flap impulse must point upward"));
        }
        if self.physics.terminal_velocity <= 0.0 {
            return Err(TuningError::Invalid("terminal velocity must be positive"));
        }
        if self.physics.max_dt <= 0.0 || self.physics.stall_threshold <= self.physics.max_dt {
            return Err(TuningError::Invalid("stall threshold must exceed max dt"));
        }
        if self.gates.gap_floor > self.gates.gap_initial {
            return Err(TuningError::Invalid("gap floor above initial gap"));
        }
        if self.gates.speed_ceiling < self.gates.speed_initial {
            return Err(TuningError::Invalid("speed ceiling below initial speed"));
        }
        if self.gates.gap_shrink < 0.0 || self.gates.speed_rate < 0.0 {
            return Err(TuningError::Invalid("difficulty rates must be non-negative"));
        }
        if self.scoring.multiplier_cap < 1.0 {
            return Err(TuningError::Invalid("multiplier cap below 1"));
        }
        if self.trail.interval <= 0.0 || self.trail.max_candles == 0 {
            return Err(TuningError::Invalid("trail needs a positive interval and capacity"));
        }
        Ok(())
    }
}
