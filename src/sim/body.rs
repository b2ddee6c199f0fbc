//! Player body kinematics
//!
//! The body lives in a fixed horizontal lane and only moves vertically.
//! Screen coordinates: y grows downward, so an upward flap is negative velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Viewport;
use crate::tuning::{PhysicsTuning, PlayerTuning};

/// Direction of vertical travel (drawn as a green or red candle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Moving up
    Bullish,
    /// Falling or at rest
    Bearish,
}

impl Trend {
    fn from_velocity(vel_y: f32) -> Self {
        if vel_y < 0.0 {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }
}

/// The player's candle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center position (x is the lane, y is free)
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive = down)
    pub vel_y: f32,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    pub trend: Trend,
}

impl Body {
    /// A body at rest in its lane
    pub fn new(viewport: Viewport, player: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width * player.lane_fraction,
                viewport.height * player.rest_fraction,
            ),
            vel_y: 0.0,
            rotation: 0.0,
            trend: Trend::Bullish,
        }
    }

    /// Put the body back at rest in its lane
    pub fn reset(&mut self, viewport: Viewport, player: &PlayerTuning) {
        *self = Self::new(viewport, player);
    }

    /// Set velocity to the upward impulse, whatever it was before
    pub fn flap(&mut self, physics: &PhysicsTuning) {
        self.vel_y = physics.flap_impulse;
    }

    /// Integrate one step of gravity
    pub fn step(&mut self, dt: f32, physics: &PhysicsTuning) {
        self.integrate(dt, physics);
        self.trend = Trend::from_velocity(self.vel_y);
    }

    /// Post-death fall: gravity plus a constant spin, resting just below the viewport
    pub fn fall(&mut self, dt: f32, physics: &PhysicsTuning, viewport: Viewport) {
        self.integrate(dt, physics);
        self.rotation += physics.death_spin_rate * dt;
        self.trend = Trend::Bearish;

        let floor = viewport.height + physics.death_floor_margin;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel_y = 0.0;
        }
    }

    /// Menu idle animation: hover around the resting height
    pub fn bob(&mut self, idle_time: f32, viewport: Viewport, player: &PlayerTuning) {
        self.pos.x = viewport.width * player.lane_fraction;
        self.pos.y = viewport.height * player.rest_fraction
            + (idle_time * player.bob_speed).sin() * player.bob_amplitude;
        self.vel_y = 0.0;
        self.rotation = 0.0;
        self.trend = Trend::Bullish;
    }

    /// Collision box (candle body only)
    pub fn hitbox(&self, player: &PlayerTuning) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(player.width, player.height))
    }

    fn integrate(&mut self, dt: f32, physics: &PhysicsTuning) {
        self.vel_y += physics.gravity * dt;
        self.vel_y = self.vel_y.min(physics.terminal_velocity);
        self.pos.y += self.vel_y * dt;
    }
}
