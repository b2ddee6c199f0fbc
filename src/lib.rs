//! Stocky Bird - a market-themed flappy arcade game with a math quiz
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, gates, collisions, quiz, scoring)
//! - `tuning`: Data-driven game balance
//! - `persistence`: High-water mark store (file, LocalStorage, memory)

pub mod persistence;
pub mod sim;
pub mod tuning;

pub use persistence::{HighScoreStore, MemoryStore, NullStore, StoreError};
pub use tuning::{Tuning, TuningError};

/// Default game balance constants
///
/// `Tuning::default()` is built from these; a tuning file can override any of them.
pub mod consts {
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1200.0;
    /// Velocity set by a flap (px/s, negative = upward)
    pub const FLAP_IMPULSE: f32 = -380.0;
    /// Maximum fall speed (px/s)
    pub const TERMINAL_VELOCITY: f32 = 600.0;
    /// Largest step ever fed to the simulation (s)
    pub const MAX_DT: f32 = 0.05;
    /// Raw frame gap that counts as a stall and auto-pauses (s)
    pub const STALL_THRESHOLD: f32 = 1.0;
    /// Spin applied to the body while it falls after death (rad/s)
    pub const DEATH_SPIN_RATE: f32 = 3.0;
    /// How far below the viewport the dead body comes to rest (px)
    pub const DEATH_FLOOR_MARGIN: f32 = 50.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// Horizontal lane as a fraction of viewport width
    pub const PLAYER_LANE: f32 = 0.2;
    /// Resting height as a fraction of viewport height
    pub const PLAYER_REST: f32 = 0.45;
    /// Menu idle bob
    pub const BOB_AMPLITUDE: f32 = 8.0;
    pub const BOB_SPEED: f32 = 2.0;

    /// Gate pool capacity (fixed, never grows)
    pub const GATE_POOL_SIZE: usize = 6;
    pub const PIPE_WIDTH: f32 = 8.0;
    pub const GAP_INITIAL: f32 = 160.0;
    pub const GAP_FLOOR: f32 = 100.0;
    /// Gap shrink per trade (px)
    pub const GAP_SHRINK: f32 = 3.0;
    pub const SPEED_INITIAL: f32 = 120.0;
    pub const SPEED_CEILING: f32 = 220.0;
    /// Scroll speed increase per trade (px/s)
    pub const SPEED_RATE: f32 = 4.0;
    /// Fixed horizontal distance between consecutive gates (px)
    pub const GATE_SPACING: f32 = 600.0;
    /// Spawn threshold sits this far past the right edge (px)
    pub const SPAWN_LEAD: f32 = 50.0;
    /// The first gate of a run appears this far past the right edge (px)
    pub const FIRST_SPAWN_OFFSET: f32 = 200.0;
    /// Minimum distance between a gap and the top/bottom edge (px)
    pub const EDGE_MARGIN: f32 = 60.0;
    pub const PRICE_INITIAL: f64 = 100.0;
    pub const PRICE_DRIFT: f64 = 5.0;
    /// Price label offset per px of half-gap
    pub const PRICE_SPREAD: f64 = 0.1;

    /// P&L credited per gate cleared ($)
    pub const BASE_VALUE: f64 = 250.0;
    /// P&L debited per wrong answer ($)
    pub const WRONG_PENALTY: f64 = 50.0;
    /// Multiplier gained per first-try streak step
    pub const STREAK_BONUS: f64 = 0.1;
    pub const MULTIPLIER_CAP: f64 = 2.0;

    /// Submissions are rejected for this long after a wrong answer (ms)
    pub const LOCKOUT_MS: f32 = 300.0;
    /// Options offered per question
    pub const NUM_OPTIONS: usize = 4;

    /// GAME_OVER cooldown before a restart is accepted (ms)
    pub const RESTART_DELAY_MS: f32 = 1000.0;
    /// Distance (fraction of viewport width) over which time pressure ramps 0 -> 1
    pub const PRESSURE_SPAN: f32 = 0.6;

    /// Seconds per trail candle
    pub const TRAIL_INTERVAL: f32 = 0.15;
    pub const TRAIL_MAX_CANDLES: usize = 60;
    pub const TRAIL_CANDLE_WIDTH: f32 = 12.0;
}

/// Clamp a value into [0, 1]
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
