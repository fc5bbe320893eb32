//! Spawn descriptors - mutable in-progress records of firing parameters
//!
//! A descriptor is created fresh per fire trigger, threaded by `&mut`
//! through the pipeline, then read by the terminal fireable. Its modifier
//! chain is owned exclusively and append-only; copying a descriptor
//! deep-copies the chain so the two never share storage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::modifier::Modifier;
use crate::consts::DEFAULT_SPEED;
use crate::{normalize_angle, polar_to_cartesian};

/// The in-progress record of parameters for an about-to-be-created bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    /// Spawn origin
    pub origin: Vec2,
    /// Initial heading (radians)
    pub heading: f32,
    /// Initial speed (units/sec)
    pub speed: f32,
    /// Ordered modifier chain; tail-insert only during traversal
    chain: Vec<Modifier>,
}

impl Default for SpawnDescriptor {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            heading: 0.0,
            speed: DEFAULT_SPEED,
            chain: Vec::new(),
        }
    }
}

impl SpawnDescriptor {
    /// Identity transform, empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Tail-insert a modifier; earlier entries are never reordered or removed
    pub fn append_modifier(&mut self, modifier: Modifier) {
        self.chain.push(modifier);
    }

    /// Deep-copy origin/heading/speed and the whole chain from `other`,
    /// overwriting self's prior state. The two descriptors share no storage
    /// afterward: appending to either side leaves the other untouched.
    pub fn copy_from(&mut self, other: &SpawnDescriptor) {
        self.origin = other.origin;
        self.heading = other.heading;
        self.speed = other.speed;
        self.chain = other.chain.clone();
    }

    /// Read-only view of the modifier chain, in append order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.chain
    }

    /// Initial velocity implied by heading and speed
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.heading)
    }

    /// Realize a concrete spawn request: fold the chain's spawn-time
    /// transforms over (origin, heading, speed) in append order, then clone
    /// the chain for the spawned bullet to carry.
    pub fn realize(&self) -> SpawnRequest {
        self.realize_rotated(0.0)
    }

    /// Same as [`SpawnDescriptor::realize`] with the base heading rotated by
    /// `offset` before the chain applies. Multi-bullet fireables (rings,
    /// fans) realize one request per offset.
    pub(crate) fn realize_rotated(&self, offset: f32) -> SpawnRequest {
        let mut origin = self.origin;
        let mut heading = normalize_angle(self.heading + offset);
        let mut speed = self.speed;
        for modifier in &self.chain {
            modifier.apply_spawn(&mut origin, &mut heading, &mut speed);
        }
        SpawnRequest {
            origin,
            heading,
            speed,
            modifiers: self.chain.clone(),
        }
    }
}

/// A concrete, finalized spawn request handed to the host spawn subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub origin: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// Chain the spawned bullet carries; continuous entries keep acting on
    /// it in flight
    pub modifiers: Vec<Modifier>,
}

impl SpawnRequest {
    /// Initial velocity of the spawned bullet
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.heading)
    }
}
