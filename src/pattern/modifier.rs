//! Modifiers - composable transformations of spawns and live motion
//!
//! A modifier is a stateless description of one transformation step.
//! Chains are ordered and order-significant: later modifiers apply after
//! earlier ones, composing as sequential function application. Spawn-time
//! variants rewrite the descriptor's origin/heading/speed when a request
//! is realized; continuous variants act on a live bullet's motion every
//! flight step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// One transformation step in a modifier chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    /// Multiply spawn speed
    SpeedScale { factor: f32 },
    /// Add to spawn speed
    SpeedBoost { amount: f32 },
    /// Rotate spawn heading (radians)
    Turn { angle: f32 },
    /// Shift spawn origin
    Offset { delta: Vec2 },
    /// Accelerate along the current velocity direction (units/sec²)
    Accelerate { rate: f32 },
    /// Proportional velocity damping per second
    Drag { coeff: f32 },
    /// Constant acceleration (units/sec²)
    Gravity { pull: Vec2 },
    /// Steer toward a target, turn rate capped (radians/sec)
    Homing { turn_rate: f32 },
}

impl Modifier {
    /// True if this variant keeps acting on the bullet after spawn
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Modifier::Accelerate { .. }
                | Modifier::Drag { .. }
                | Modifier::Gravity { .. }
                | Modifier::Homing { .. }
        )
    }

    /// Apply the spawn-time transform. Continuous variants are inert here;
    /// they ride along in the chain until flight stepping picks them up.
    pub fn apply_spawn(&self, origin: &mut Vec2, heading: &mut f32, speed: &mut f32) {
        match self {
            Modifier::SpeedScale { factor } => *speed *= factor,
            Modifier::SpeedBoost { amount } => *speed += amount,
            Modifier::Turn { angle } => *heading = normalize_angle(*heading + angle),
            Modifier::Offset { delta } => *origin += *delta,
            _ => {}
        }
    }

    /// Apply one step of the continuous transform to a live bullet's
    /// motion. Spawn-time variants are inert here. `target` feeds homing;
    /// without one, homing does nothing this step.
    pub fn apply_motion(&self, pos: Vec2, vel: &mut Vec2, target: Option<Vec2>, dt: f32) {
        match self {
            Modifier::Accelerate { rate } => {
                *vel += vel.normalize_or_zero() * *rate * dt;
            }
            Modifier::Drag { coeff } => {
                *vel *= (1.0 - coeff * dt).max(0.0);
            }
            Modifier::Gravity { pull } => {
                *vel += *pull * dt;
            }
            Modifier::Homing { turn_rate } => {
                let Some(target) = target else { return };
                let (speed, heading) = cartesian_to_polar(*vel);
                if speed <= f32::EPSILON {
                    return;
                }
                let (_, desired) = cartesian_to_polar(target - pos);
                let max_delta = turn_rate * dt;
                let delta = normalize_angle(desired - heading).clamp(-max_delta, max_delta);
                *vel = polar_to_cartesian(speed, normalize_angle(heading + delta));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::SpawnDescriptor;

    #[test]
    fn test_spawn_application_is_order_sensitive() {
        // scale-then-boost and boost-then-scale must differ
        let mut scaled_first = SpawnDescriptor::new();
        scaled_first.append_modifier(Modifier::SpeedScale { factor: 2.0 });
        scaled_first.append_modifier(Modifier::SpeedBoost { amount: 50.0 });

        let mut boosted_first = SpawnDescriptor::new();
        boosted_first.append_modifier(Modifier::SpeedBoost { amount: 50.0 });
        boosted_first.append_modifier(Modifier::SpeedScale { factor: 2.0 });

        let base = SpawnDescriptor::new().speed;
        assert_eq!(scaled_first.realize().speed, base * 2.0 + 50.0);
        assert_eq!(boosted_first.realize().speed, (base + 50.0) * 2.0);
    }

    #[test]
    fn test_continuous_variants_inert_at_spawn() {
        let mut origin = Vec2::new(1.0, 2.0);
        let mut heading = 0.5;
        let mut speed = 100.0;

        Modifier::Accelerate { rate: 500.0 }.apply_spawn(&mut origin, &mut heading, &mut speed);
        Modifier::Homing { turn_rate: 3.0 }.apply_spawn(&mut origin, &mut heading, &mut speed);

        assert_eq!(origin, Vec2::new(1.0, 2.0));
        assert_eq!(heading, 0.5);
        assert_eq!(speed, 100.0);
    }

    #[test]
    fn test_spawn_variants_inert_in_motion() {
        let mut vel = Vec2::new(100.0, 0.0);
        Modifier::SpeedScale { factor: 2.0 }.apply_motion(Vec2::ZERO, &mut vel, None, 0.1);
        Modifier::Turn { angle: 1.0 }.apply_motion(Vec2::ZERO, &mut vel, None, 0.1);
        assert_eq!(vel, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_drag_slows_velocity() {
        let mut vel = Vec2::new(100.0, 0.0);
        Modifier::Drag { coeff: 0.5 }.apply_motion(Vec2::ZERO, &mut vel, None, 0.1);
        assert!((vel.x - 95.0).abs() < 0.001);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut vel = Vec2::ZERO;
        let pull = Vec2::new(0.0, -98.0);
        Modifier::Gravity { pull }.apply_motion(Vec2::ZERO, &mut vel, None, 0.5);
        assert_eq!(vel, Vec2::new(0.0, -49.0));
    }

    #[test]
    fn test_homing_turn_is_clamped() {
        // Moving along +x, target straight up: one step may only turn
        // turn_rate * dt radians
        let mut vel = Vec2::new(100.0, 0.0);
        Modifier::Homing { turn_rate: 1.0 }.apply_motion(
            Vec2::ZERO,
            &mut vel,
            Some(Vec2::new(0.0, 500.0)),
            0.1,
        );

        let (speed, heading) = cartesian_to_polar(vel);
        assert!((speed - 100.0).abs() < 0.01);
        assert!((heading - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_homing_without_target_is_inert() {
        let mut vel = Vec2::new(100.0, 0.0);
        Modifier::Homing { turn_rate: 1.0 }.apply_motion(Vec2::ZERO, &mut vel, None, 0.1);
        assert_eq!(vel, Vec2::new(100.0, 0.0));
    }
}
