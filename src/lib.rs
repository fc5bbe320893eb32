//! Barrage - a composable bullet-pattern engine
//!
//! Core modules:
//! - `pattern`: Composition core (descriptors, modifier chains, fireables, pipelines)
//! - `flight`: Live bullet motion stepping
//! - `authoring`: Serialized pattern definitions with load-time validation

pub mod authoring;
pub mod flight;
pub mod pattern;

pub use flight::Projectile;
pub use pattern::{
    FireContext, Fireable, Modifier, Pattern, PatternError, Pipeline, PipelineNode,
    RandomSelector, SpawnDescriptor, SpawnRequest, Trigger,
};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Default initial speed for a fresh spawn descriptor (units/sec)
    pub const DEFAULT_SPEED: f32 = 200.0;
    /// Maximum speed a live bullet may reach (flight stepping clamps to this)
    pub const MAX_BULLET_SPEED: f32 = 1200.0;
    /// Upper bound on spawn requests a single trigger may produce
    pub const MAX_SPAWNS_PER_TRIGGER: u32 = 64;
}

/// Wrap an angle into [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
