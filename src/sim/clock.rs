//! Step sizing
//!
//! Turns the raw time between host frames into the step the simulation
//! actually advances by. Long stalls (hidden tab, debugger, suspended
//! window) pause the game instead of replaying a huge step.

use serde::{Deserialize, Serialize};

use crate::tuning::PhysicsTuning;

/// Frame delta normalizer with stall detection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    paused: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective step for a raw frame delta (seconds).
    ///
    /// A delta above the stall threshold enters the paused sub-state. While
    /// paused the step is always zero until `resume` is called.
    pub fn advance(&mut self, raw_dt: f32, physics: &PhysicsTuning) -> f32 {
        if raw_dt > physics.stall_threshold {
            self.paused = true;
        }
        if self.paused {
            return 0.0;
        }
        raw_dt.clamp(0.0, physics.max_dt)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Leave the paused sub-state (explicit resume input)
    pub fn resume(&mut self) {
        self.paused = false;
    }
}
