//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod gates;
pub mod ledger;
pub mod quiz;
pub mod state;
pub mod tick;
pub mod trail;

pub use body::{Body, Trend};
pub use clock::SimulationClock;
pub use collision::{Aabb, crosses_gate, gate_pipes, hits_boundary, hits_gate};
pub use gates::{Gate, GateField};
pub use ledger::ScoreState;
pub use quiz::{AnswerKey, AnswerOutcome, Expression, Question, QuizEngine, Tier};
pub use state::{DeathCause, GameEvent, GameState, Phase, Viewport};
pub use tick::{TickInput, tick};
pub use trail::{Candle, CandlestickTrail};
