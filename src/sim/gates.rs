//! Scrolling gate pool
//!
//! Gates live in a fixed array of slots. Nothing is allocated while playing:
//! a gate that scrolls off the left edge is deactivated and its slot is
//! reused for the next spawn on the right.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::consts::GATE_POOL_SIZE;
use crate::tuning::GateTuning;

/// One slot of the gate pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gate {
    /// Horizontal center of the pipes
    pub x: f32,
    pub gap_center: f32,
    pub gap_size: f32,
    /// Price label drawn on the upper pipe
    pub resistance: f64,
    /// Price label drawn on the lower pipe
    pub support: f64,
    pub active: bool,
    /// The body has cleared this gate
    pub passed: bool,
    /// The question raised by clearing this gate has been answered
    pub question_answered: bool,
}

impl Gate {
    /// Activate this slot with fresh geometry
    pub fn init(&mut self, x: f32, gap_center: f32, gap_size: f32, price: f64, spread: f64) {
        let offset = (gap_size as f64 / 2.0) * spread;
        *self = Self {
            x,
            gap_center,
            gap_size,
            resistance: price + offset,
            support: price - offset,
            active: true,
            passed: false,
            question_answered: false,
        };
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_size / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_size / 2.0
    }
}

/// Fixed-capacity pool of gates plus the difficulty state that drives spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateField {
    pub slots: [Gate; GATE_POOL_SIZE],
    /// Current scroll speed (px/s)
    pub scroll_speed: f32,
    /// Drifting base price for the cosmetic labels
    price: f64,
}

impl GateField {
    pub fn new(tuning: &GateTuning) -> Self {
        Self {
            slots: Default::default(),
            scroll_speed: tuning.speed_initial,
            price: tuning.price_initial,
        }
    }

    /// Deactivate every slot and restore the starting speed and price
    pub fn reset(&mut self, tuning: &GateTuning) {
        for gate in &mut self.slots {
            gate.deactivate();
        }
        self.scroll_speed = tuning.speed_initial;
        self.price = tuning.price_initial;
    }

    /// Active gates with their slot index
    pub fn active(&self) -> impl Iterator<Item = (usize, &Gate)> {
        self.slots.iter().enumerate().filter(|(_, g)| g.active)
    }

    /// Scroll, recycle and spawn for one step
    pub fn update(
        &mut self,
        dt: f32,
        viewport: Viewport,
        trades: u32,
        tuning: &GateTuning,
        rng: &mut Pcg32,
    ) {
        self.scroll_speed = tuning.speed_for(trades);

        let recycle_x = -tuning.pipe_width * 2.0;
        for gate in self.slots.iter_mut().filter(|g| g.active) {
            gate.x -= self.scroll_speed * dt;
            if gate.x < recycle_x {
                gate.deactivate();
            }
        }

        let spawn_threshold = viewport.width + tuning.spawn_lead;
        let rightmost = self.rightmost_x();
        let due = rightmost.is_none_or(|x| x < spawn_threshold - tuning.spacing);
        if due {
            let spawn_x = match rightmost {
                Some(x) => x + tuning.spacing,
                None => viewport.width + tuning.first_spawn_offset,
            };
            self.spawn(spawn_x, viewport, trades, tuning, rng);
        }
    }

    /// Activate a free slot at `x`. Returns the slot index, or None if the pool is full.
    pub fn spawn(
        &mut self,
        x: f32,
        viewport: Viewport,
        trades: u32,
        tuning: &GateTuning,
        rng: &mut Pcg32,
    ) -> Option<usize> {
        let slot = self.slots.iter().position(|g| !g.active)?;

        let gap_size = tuning.gap_for(trades);
        let min_y = tuning.edge_margin + gap_size / 2.0;
        let max_y = viewport.height - tuning.edge_margin - gap_size / 2.0;
        let gap_center = if max_y > min_y {
            rng.random_range(min_y..max_y)
        } else {
            // Viewport too short for the margins
            viewport.height / 2.0
        };

        self.price += tuning.price_drift * (0.5 + rng.random::<f64>());
        self.slots[slot].init(x, gap_center, gap_size, self.price, tuning.price_spread);
        Some(slot)
    }

    /// The nearest active gate ahead of `x` (a gate whose center is at most
    /// half a pipe behind still counts).
    pub fn next_gate(&self, x: f32, pipe_width: f32) -> Option<(usize, &Gate)> {
        self.active()
            .filter(|(_, g)| g.x - x >= -pipe_width / 2.0)
            .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|g| g.active).count()
    }

    fn rightmost_x(&self) -> Option<f32> {
        self.active().map(|(_, g)| g.x).max_by(f32::total_cmp)
    }
}
