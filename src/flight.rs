//! Live bullet flight - continuous modifier stepping
//!
//! The engine never creates visible game objects; hosts that want it to
//! own bullet motion can convert a spawn request into a [`Projectile`] and
//! step it each fixed tick. Continuous chain entries apply in append
//! order, then velocity integrates into position.

use glam::Vec2;

use crate::consts::MAX_BULLET_SPEED;
use crate::pattern::{Modifier, SpawnRequest};

/// A live bullet owned by the host's fixed-tick loop
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds alive
    pub age: f32,
    chain: Vec<Modifier>,
}

impl Projectile {
    pub fn new(request: &SpawnRequest) -> Self {
        Self {
            pos: request.origin,
            vel: request.velocity(),
            age: 0.0,
            chain: request.modifiers.clone(),
        }
    }

    /// The modifier chain this bullet carries
    pub fn modifiers(&self) -> &[Modifier] {
        &self.chain
    }

    /// Advance one fixed timestep. `target` feeds homing modifiers; pass
    /// `None` when there is nothing to home on.
    pub fn step(&mut self, target: Option<Vec2>, dt: f32) {
        for modifier in &self.chain {
            modifier.apply_motion(self.pos, &mut self.vel, target, dt);
        }

        // Clamp speed so stacked accelerations stay bounded
        let speed = self.vel.length();
        if speed > MAX_BULLET_SPEED {
            self.vel = self.vel.normalize_or_zero() * MAX_BULLET_SPEED;
        }

        self.pos += self.vel * dt;
        self.age += dt;
    }
}

impl From<&SpawnRequest> for Projectile {
    fn from(request: &SpawnRequest) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian_to_polar;

    fn request(speed: f32, modifiers: Vec<Modifier>) -> SpawnRequest {
        SpawnRequest {
            origin: Vec2::ZERO,
            heading: 0.0,
            speed,
            modifiers,
        }
    }

    #[test]
    fn test_step_integrates_position() {
        let mut projectile = Projectile::new(&request(100.0, Vec::new()));
        projectile.step(None, 0.5);
        assert_eq!(projectile.pos, Vec2::new(50.0, 0.0));
        assert_eq!(projectile.age, 0.5);
    }

    #[test]
    fn test_accelerate_gains_speed() {
        let mut projectile =
            Projectile::new(&request(100.0, vec![Modifier::Accelerate { rate: 40.0 }]));
        projectile.step(None, 0.5);
        assert!((projectile.vel.length() - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_speed_clamped_to_engine_max() {
        let mut projectile =
            Projectile::new(&request(100.0, vec![Modifier::Accelerate { rate: 1.0e6 }]));
        projectile.step(None, 1.0);
        assert!(projectile.vel.length() <= MAX_BULLET_SPEED + 0.01);
    }

    #[test]
    fn test_chain_applies_in_append_order() {
        // gravity-then-drag damps the fresh gravity contribution;
        // drag-then-gravity leaves it untouched this step
        let gravity = Modifier::Gravity {
            pull: Vec2::new(0.0, -100.0),
        };
        let drag = Modifier::Drag { coeff: 0.5 };

        let mut gravity_first =
            Projectile::new(&request(100.0, vec![gravity.clone(), drag.clone()]));
        let mut drag_first = Projectile::new(&request(100.0, vec![drag, gravity]));

        gravity_first.step(None, 0.2);
        drag_first.step(None, 0.2);

        assert!((gravity_first.vel.y - (-100.0 * 0.2) * 0.9).abs() < 0.001);
        assert!((drag_first.vel.y - (-100.0 * 0.2)).abs() < 0.001);
    }

    #[test]
    fn test_homing_turns_toward_target_over_steps() {
        let mut projectile =
            Projectile::new(&request(100.0, vec![Modifier::Homing { turn_rate: 2.0 }]));
        let target = Vec2::new(0.0, 1000.0);

        let (_, initial_heading) = cartesian_to_polar(projectile.vel);
        for _ in 0..10 {
            projectile.step(Some(target), 1.0 / 60.0);
        }
        let (_, heading) = cartesian_to_polar(projectile.vel);

        assert!(heading > initial_heading);
        assert!(heading <= std::f32::consts::FRAC_PI_2 + 0.001);
    }
}
