//! Trade count, profit/loss and the streak multiplier

use serde::{Deserialize, Serialize};

use crate::tuning::ScoringTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    /// Gates cleared this run
    pub trades: u32,
    /// Profit/loss ($)
    pub pnl: f64,
    /// Consecutive first-try correct answers
    pub streak: u32,
    /// Credit multiplier, 1.0 up to the cap
    pub multiplier: f64,
    /// Best P&L across sessions
    pub high_water: f64,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::with_high_water(0.0)
    }
}

impl ScoreState {
    pub fn with_high_water(high_water: f64) -> Self {
        Self {
            trades: 0,
            pnl: 0.0,
            streak: 0,
            multiplier: 1.0,
            high_water,
        }
    }

    /// Zero the run, keep the high-water mark
    pub fn reset(&mut self) {
        *self = Self::with_high_water(self.high_water);
    }

    /// A gate was cleared. Returns the credit added to P&L.
    pub fn record_pass(&mut self, tuning: &ScoringTuning) -> f64 {
        self.trades += 1;
        let credit = tuning.base_value * self.multiplier;
        self.pnl += credit;
        credit
    }

    /// A question was answered correctly
    pub fn record_correct(&mut self, first_try: bool, tuning: &ScoringTuning) {
        if first_try {
            self.streak += 1;
            self.multiplier =
                (1.0 + self.streak as f64 * tuning.streak_bonus).min(tuning.multiplier_cap);
        }
    }

    /// A wrong answer: penalty, streak and multiplier reset
    pub fn record_wrong(&mut self, tuning: &ScoringTuning) {
        self.pnl -= tuning.wrong_penalty;
        self.streak = 0;
        self.multiplier = 1.0;
    }

    /// Raise the high-water mark if this run beat it. Returns the new mark if raised.
    pub fn commit_high_water(&mut self) -> Option<f64> {
        (self.pnl > self.high_water).then(|| {
            self.high_water = self.pnl;
            self.pnl
        })
    }
}
