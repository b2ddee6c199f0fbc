//! Candlestick trail left behind the player
//!
//! Vertical motion is sampled into OHLC candles at a fixed interval. Candles
//! are stamped at the player's lane and then scroll left with the gates.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tuning::TrailTuning;

/// One sampled interval. Screen y: "high" is the smallest y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub x: f32,
    pub open: f32,
    pub close: f32,
    pub high: f32,
    pub low: f32,
    /// Closed above its open (moved up the screen)
    pub bullish: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandlestickTrail {
    pub candles: VecDeque<Candle>,
    timer: f32,
    open: f32,
    high: f32,
    low: f32,
    active: bool,
}

impl CandlestickTrail {
    pub fn new(tuning: &TrailTuning) -> Self {
        Self {
            candles: VecDeque::with_capacity(tuning.max_candles + 1),
            ..Default::default()
        }
    }

    /// Drop all candles and stop sampling
    pub fn reset(&mut self) {
        self.candles.clear();
        self.timer = 0.0;
        self.active = false;
    }

    /// Begin sampling from the current height
    pub fn start(&mut self, y: f32) {
        self.active = true;
        self.timer = 0.0;
        self.open = y;
        self.high = y;
        self.low = y;
    }

    pub fn update(&mut self, dt: f32, x: f32, y: f32, scroll_speed: f32, tuning: &TrailTuning) {
        if !self.active {
            return;
        }

        self.high = self.high.min(y);
        self.low = self.low.max(y);

        for candle in &mut self.candles {
            candle.x -= scroll_speed * dt;
        }
        self.candles.retain(|c| c.x >= -tuning.candle_width);

        self.timer += dt;
        if self.timer >= tuning.interval {
            self.timer -= tuning.interval;
            self.candles.push_back(Candle {
                x,
                open: self.open,
                close: y,
                high: self.high,
                low: self.low,
                bullish: y < self.open,
            });
            while self.candles.len() > tuning.max_candles {
                self.candles.pop_front();
            }
            // Next candle opens where this one closed
            self.open = y;
            self.high = y;
            self.low = y;
        }
    }
}
