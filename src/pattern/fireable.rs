//! Fireables - decision units resolving a finalized descriptor into spawns
//!
//! A fireable decides which concrete spawn(s) a trigger produces. Leaf
//! variants are deterministic; `Selector` draws from the injected random
//! source. Resolution is total: a validated fireable always returns zero
//! or more requests and never fails or panics.

use rand::RngCore;

use super::descriptor::{SpawnDescriptor, SpawnRequest};
use super::error::PatternError;

/// Opaque per-fire payload from the host trigger source. Threaded through
/// to fireables untouched; the engine never branches on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trigger {
    /// Host-side tick or cue identifier
    pub tick: u64,
}

/// Everything a fireable may read while resolving
#[derive(Debug, Clone, Copy)]
pub struct FireContext<'a> {
    /// Finalized descriptor produced by pipeline traversal
    pub descriptor: &'a SpawnDescriptor,
    /// Opaque trigger payload
    pub trigger: &'a Trigger,
}

/// A decision unit resolving a finalized descriptor into spawn requests
#[derive(Debug, Clone)]
pub enum Fireable {
    /// One spawn, straight from the descriptor
    Emitter,
    /// `count` spawns with headings spaced evenly over a full turn
    Ring { count: u32 },
    /// `count` spawns spread over `spread` radians, centered on the heading
    Fan { count: u32, spread: f32 },
    /// Uniform-random choice among optional sub-fireables
    Selector(RandomSelector),
}

impl Fireable {
    /// Resolve into zero or more spawn requests.
    ///
    /// Pure in (context, random draws): a fixed rng stream reproduces the
    /// same requests every time.
    pub fn resolve<R: RngCore>(&self, ctx: &FireContext<'_>, rng: &mut R) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();
        self.resolve_into(ctx, rng, &mut requests);
        requests
    }

    fn resolve_into<R: RngCore>(
        &self,
        ctx: &FireContext<'_>,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) {
        match self {
            Fireable::Emitter => out.push(ctx.descriptor.realize()),
            Fireable::Ring { count } => {
                let step = std::f32::consts::TAU / *count as f32;
                for i in 0..*count {
                    out.push(ctx.descriptor.realize_rotated(i as f32 * step));
                }
            }
            Fireable::Fan { count, spread } => {
                if *count == 1 {
                    out.push(ctx.descriptor.realize());
                } else {
                    let step = spread / (*count as f32 - 1.0);
                    for i in 0..*count {
                        out.push(ctx.descriptor.realize_rotated(-spread / 2.0 + i as f32 * step));
                    }
                }
            }
            Fireable::Selector(selector) => selector.resolve_into(ctx, rng, out),
        }
    }

    /// Worst-case number of requests a single resolution can produce
    pub fn max_spawns(&self) -> u32 {
        match self {
            Fireable::Emitter => 1,
            Fireable::Ring { count } | Fireable::Fan { count, .. } => *count,
            Fireable::Selector(selector) => selector
                .options()
                .iter()
                .flatten()
                .map(Fireable::max_spawns)
                .max()
                .unwrap_or(0),
        }
    }

    /// Check the authored structure. Zero-count bursts are configuration
    /// errors; selectors are re-checked recursively so hand-built trees get
    /// the same guarantees as compiled ones.
    pub(crate) fn validate(&self) -> Result<(), PatternError> {
        match self {
            Fireable::Emitter => Ok(()),
            Fireable::Ring { count } | Fireable::Fan { count, .. } => {
                if *count == 0 {
                    Err(PatternError::EmptyBurst)
                } else {
                    Ok(())
                }
            }
            Fireable::Selector(selector) => {
                if selector.options().is_empty() {
                    return Err(PatternError::EmptySelector);
                }
                for sub in selector.options().iter().flatten() {
                    sub.validate()?;
                }
                Ok(())
            }
        }
    }
}

/// Uniform-random choice among an ordered set of optional sub-fireables.
/// Absent entries are deliberate "do nothing" outcomes.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    options: Vec<Option<Fireable>>,
}

impl RandomSelector {
    /// An empty option set is an authoring mistake and fails here, at
    /// construction, never at resolution.
    pub fn new(options: Vec<Option<Fireable>>) -> Result<Self, PatternError> {
        if options.is_empty() {
            return Err(PatternError::EmptySelector);
        }
        Ok(Self { options })
    }

    /// The option slots, in authored order
    pub fn options(&self) -> &[Option<Fireable>] {
        &self.options
    }

    fn resolve_into<R: RngCore>(
        &self,
        ctx: &FireContext<'_>,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) {
        // Exactly one u32 of entropy per resolution, whichever branch is
        // taken, so seeded replays stay aligned. Widening multiply maps the
        // draw uniformly onto [0, len) without a rejection loop.
        let draw = rng.next_u32();
        let index = ((draw as u64 * self.options.len() as u64) >> 32) as usize;
        if let Some(chosen) = &self.options[index] {
            chosen.resolve_into(ctx, rng, out);
        }
    }
}
