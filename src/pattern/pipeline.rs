//! Pipeline traversal - ordered processing of a spawn descriptor
//!
//! A pipeline is the authored sequence of steps a fresh descriptor flows
//! through before the terminal fireable resolves it. Each node runs
//! exactly once per trigger, in authoring order, against an exclusively
//! borrowed descriptor; no node can retain the descriptor past its own
//! `process` call.

use rand::RngCore;

use super::descriptor::{SpawnDescriptor, SpawnRequest};
use super::error::PatternError;
use super::fireable::{FireContext, Fireable, Trigger};
use super::modifier::Modifier;
use crate::consts::MAX_SPAWNS_PER_TRIGGER;

/// One authored processing step
#[derive(Debug, Clone)]
pub enum PipelineNode {
    /// Tail-insert a modifier into the descriptor's chain
    AppendModifier(Modifier),
    /// Copy origin/heading/speed in from a template descriptor and append
    /// the template's chain to the tail
    MergeTemplate(SpawnDescriptor),
}

impl PipelineNode {
    /// Mutate the descriptor in place. The borrow ends when this returns.
    pub fn process(&self, descriptor: &mut SpawnDescriptor) {
        match self {
            PipelineNode::AppendModifier(modifier) => {
                descriptor.append_modifier(modifier.clone());
            }
            PipelineNode::MergeTemplate(template) => {
                descriptor.origin = template.origin;
                descriptor.heading = template.heading;
                descriptor.speed = template.speed;
                for modifier in template.modifiers() {
                    descriptor.append_modifier(modifier.clone());
                }
            }
        }
    }
}

/// An ordered sequence of pipeline nodes
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    nodes: Vec<PipelineNode>,
}

impl Pipeline {
    pub fn new(nodes: Vec<PipelineNode>) -> Self {
        Self { nodes }
    }

    /// The nodes, in authoring order
    pub fn nodes(&self) -> &[PipelineNode] {
        &self.nodes
    }

    /// Thread a fresh descriptor through every node in authoring order and
    /// return it for the terminal fireable. The trigger payload is opaque
    /// and only rides along for the fireable stage.
    pub fn execute(&self, _trigger: &Trigger) -> SpawnDescriptor {
        let mut descriptor = SpawnDescriptor::new();
        for node in &self.nodes {
            node.process(&mut descriptor);
        }
        descriptor
    }
}

/// A compiled firing pattern: pipeline plus terminal fireable
#[derive(Debug, Clone)]
pub struct Pattern {
    pipeline: Pipeline,
    fireable: Fireable,
}

impl Pattern {
    /// Validate and assemble. Authored-structure mistakes (empty selector,
    /// zero-count burst, oversized worst case) surface here, never at
    /// fire-time.
    pub fn new(pipeline: Pipeline, fireable: Fireable) -> Result<Self, PatternError> {
        fireable.validate()?;
        let worst_case = fireable.max_spawns();
        if worst_case > MAX_SPAWNS_PER_TRIGGER {
            return Err(PatternError::SpawnBudgetExceeded {
                worst_case,
                limit: MAX_SPAWNS_PER_TRIGGER,
            });
        }
        Ok(Self { pipeline, fireable })
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn fireable(&self) -> &Fireable {
        &self.fireable
    }

    /// Process one fire trigger to completion: fresh descriptor, full
    /// traversal, terminal resolution. Total - zero or more requests,
    /// never an error.
    pub fn fire<R: RngCore>(&self, trigger: &Trigger, rng: &mut R) -> Vec<SpawnRequest> {
        let descriptor = self.pipeline.execute(trigger);
        let ctx = FireContext {
            descriptor: &descriptor,
            trigger,
        };
        self.fireable.resolve(&ctx, rng)
    }
}
