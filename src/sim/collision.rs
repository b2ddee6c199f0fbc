//! Collision detection for the scrolling course
//!
//! Everything is axis-aligned: the body is a box, each gate is two boxes
//! (the pipe above the gap and the pipe below it), and the playfield is
//! the viewport rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gates::Gate;
use super::state::Viewport;

/// Axis-aligned bounding box (min = top-left in screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// True if the hitbox pokes out of the top or bottom of the playfield
pub fn hits_boundary(hitbox: &Aabb, viewport: Viewport) -> bool {
    hitbox.min.y < 0.0 || hitbox.max.y > viewport.height
}

/// The two solid pipes of a gate: above the gap and below it
pub fn gate_pipes(gate: &Gate, pipe_width: f32, viewport: Viewport) -> [Aabb; 2] {
    let left = gate.x - pipe_width / 2.0;
    let right = gate.x + pipe_width / 2.0;
    [
        Aabb::new(Vec2::new(left, 0.0), Vec2::new(right, gate.gap_top())),
        Aabb::new(
            Vec2::new(left, gate.gap_bottom()),
            Vec2::new(right, viewport.height),
        ),
    ]
}

/// True if the hitbox overlaps either pipe of an active gate
pub fn hits_gate(hitbox: &Aabb, gate: &Gate, pipe_width: f32, viewport: Viewport) -> bool {
    if !gate.active {
        return false;
    }
    gate_pipes(gate, pipe_width, viewport)
        .iter()
        .any(|pipe| hitbox.intersects(pipe))
}

/// True the first time the body's center clears the gate's trailing edge
pub fn crosses_gate(body_x: f32, gate: &Gate, pipe_width: f32) -> bool {
    gate.active && !gate.passed && body_x > gate.x + pipe_width / 2.0
}
