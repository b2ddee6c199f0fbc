//! Game state and core simulation types
//!
//! Everything the step function owns lives in `GameState`. Presentation and
//! audio read it between steps and drain `events`; nothing else mutates it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::clock::SimulationClock;
use super::gates::{Gate, GateField};
use super::ledger::ScoreState;
use super::quiz::{Question, QuizEngine};
use super::trail::CandlestickTrail;
use crate::saturate;
use crate::tuning::Tuning;

/// Playfield size in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Current phase of gameplay, with the timers each phase owns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Idle bob, waiting for a start signal
    Menu { idle_time: f32 },
    /// Active run
    Playing,
    /// Body falls; restart accepted after the cooldown
    GameOver { death_timer_ms: f32 },
}

impl Phase {
    pub fn menu() -> Self {
        Phase::Menu { idle_time: 0.0 }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched the top or bottom of the playfield
    Boundary,
    /// Hit a gate's pipe
    Gate { slot: usize },
    /// Reached the next gate with the question still unanswered
    MissedQuestion { slot: usize },
}

/// Notifications for presentation/audio, drained after each step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flap,
    ScoreIncrement { trades: u32, credit: f64 },
    Correct { first_try: bool },
    Wrong { penalty: f64 },
    Death { cause: DeathCause },
    NewHighWater { value: f64 },
    Paused,
    Resumed,
    ReturnedToMenu,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: Phase,
    pub clock: SimulationClock,
    pub body: Body,
    pub gates: GateField,
    pub quiz: QuizEngine,
    pub score: ScoreState,
    pub trail: CandlestickTrail,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning, high_water: f64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            body: Body::new(viewport, &tuning.player),
            gates: GateField::new(&tuning.gates),
            trail: CandlestickTrail::new(&tuning.trail),
            quiz: QuizEngine::new(),
            score: ScoreState::with_high_water(high_water),
            clock: SimulationClock::new(),
            phase: Phase::menu(),
            events: Vec::with_capacity(8),
            viewport,
            tuning,
        }
    }

    /// Host window changed size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// The live question, if any
    pub fn question(&self) -> Option<&Question> {
        self.quiz.current.as_ref()
    }

    /// Active gates with their slot index
    pub fn active_gates(&self) -> impl Iterator<Item = (usize, &Gate)> {
        self.gates.active()
    }

    /// The nearest gate ahead of the body
    pub fn next_gate(&self) -> Option<(usize, &Gate)> {
        self.gates.next_gate(self.body.pos.x, self.tuning.gates.pipe_width)
    }

    /// 0..1 urgency for answering: rises as the next gate approaches while a
    /// question is live. Zero when nothing is pending.
    pub fn time_pressure(&self) -> f32 {
        if !self.phase.is_playing() || !self.quiz.is_active() {
            return 0.0;
        }
        let Some((_, gate)) = self.next_gate() else {
            return 0.0;
        };
        let span = self.viewport.width * self.tuning.flow.pressure_span;
        if span <= 0.0 {
            return 1.0;
        }
        saturate(1.0 - (gate.x - self.body.pos.x) / span)
    }

    /// Whether the GAME_OVER cooldown has elapsed
    pub fn can_restart(&self) -> bool {
        match self.phase {
            Phase::GameOver { death_timer_ms } => {
                death_timer_ms > self.tuning.flow.restart_delay_ms
            }
            _ => false,
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
