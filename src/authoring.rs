//! Authored pattern definitions
//!
//! Patterns arrive as a serialized JSON document of named tables:
//! modifiers, descriptor templates, fireables, patterns. Loading resolves
//! every name, validates the structure (dangling references, empty
//! selectors, reference cycles, spawn budget) and compiles runtime
//! [`Pattern`]s. Authoring mistakes fail here, never at fire-time.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::pattern::{
    Fireable, Modifier, Pattern, PatternError, Pipeline, PipelineNode, RandomSelector,
    SpawnDescriptor,
};

fn default_speed() -> f32 {
    crate::consts::DEFAULT_SPEED
}

/// Descriptor template: base parameters plus named chain entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDef {
    #[serde(default)]
    pub origin: Vec2,
    #[serde(default)]
    pub heading: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Modifier names appended to the template chain, in order
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// One authored pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDef {
    /// Append the named modifier to the descriptor's chain
    AppendModifier { name: String },
    /// Merge base parameters in from the named template
    MergeTemplate { name: String },
}

/// One authored fireable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FireableDef {
    Emitter,
    Ring { count: u32 },
    Fan { count: u32, spread: f32 },
    /// `null` entries are deliberate do-nothing outcomes
    Selector { options: Vec<Option<String>> },
}

/// One authored pattern: pipeline nodes plus terminal fireable reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDef {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    pub fireable: String,
}

/// Top-level authoring document. `BTreeMap` keeps compile order and error
/// reporting deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternDoc {
    #[serde(default)]
    pub modifiers: BTreeMap<String, Modifier>,
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateDef>,
    #[serde(default)]
    pub fireables: BTreeMap<String, FireableDef>,
    #[serde(default)]
    pub patterns: BTreeMap<String, PatternDef>,
}

/// Parse a JSON authoring document and compile every pattern in it
pub fn load_str(json: &str) -> Result<BTreeMap<String, Pattern>, PatternError> {
    let doc: PatternDoc =
        serde_json::from_str(json).map_err(|e| PatternError::Parse(e.to_string()))?;
    compile(&doc)
}

/// Resolve names, validate structure, and build runtime patterns
pub fn compile(doc: &PatternDoc) -> Result<BTreeMap<String, Pattern>, PatternError> {
    let mut compiled = BTreeMap::new();
    for (pattern_name, def) in &doc.patterns {
        let pattern = compile_pattern(doc, pattern_name, def)?;
        log::debug!(
            "compiled pattern '{}' ({} nodes, worst case {} spawns)",
            pattern_name,
            pattern.pipeline().nodes().len(),
            pattern.fireable().max_spawns(),
        );
        compiled.insert(pattern_name.clone(), pattern);
    }
    log::info!("compiled {} pattern(s)", compiled.len());
    Ok(compiled)
}

fn compile_pattern(
    doc: &PatternDoc,
    pattern_name: &str,
    def: &PatternDef,
) -> Result<Pattern, PatternError> {
    let mut nodes = Vec::with_capacity(def.nodes.len());
    for node in &def.nodes {
        nodes.push(match node {
            NodeDef::AppendModifier { name } => {
                let modifier =
                    doc.modifiers
                        .get(name)
                        .ok_or_else(|| PatternError::UnknownModifier {
                            pattern: pattern_name.into(),
                            name: name.clone(),
                        })?;
                PipelineNode::AppendModifier(modifier.clone())
            }
            NodeDef::MergeTemplate { name } => {
                let template =
                    doc.templates
                        .get(name)
                        .ok_or_else(|| PatternError::UnknownTemplate {
                            pattern: pattern_name.into(),
                            name: name.clone(),
                        })?;
                PipelineNode::MergeTemplate(build_template(doc, pattern_name, template)?)
            }
        });
    }

    let fireable = build_fireable(doc, pattern_name, &def.fireable, &mut Vec::new())?;
    Pattern::new(Pipeline::new(nodes), fireable).map_err(|e| PatternError::InPattern {
        pattern: pattern_name.into(),
        source: Box::new(e),
    })
}

fn build_template(
    doc: &PatternDoc,
    pattern_name: &str,
    def: &TemplateDef,
) -> Result<SpawnDescriptor, PatternError> {
    let mut descriptor = SpawnDescriptor::new();
    descriptor.origin = def.origin;
    descriptor.heading = def.heading;
    descriptor.speed = def.speed;
    for name in &def.modifiers {
        let modifier = doc
            .modifiers
            .get(name)
            .ok_or_else(|| PatternError::UnknownModifier {
                pattern: pattern_name.into(),
                name: name.clone(),
            })?;
        descriptor.append_modifier(modifier.clone());
    }
    Ok(descriptor)
}

/// Resolve a fireable reference, recursing through selectors. `visiting`
/// holds the reference path from the root; revisiting a name on the path
/// means the authored graph loops.
fn build_fireable(
    doc: &PatternDoc,
    pattern_name: &str,
    name: &str,
    visiting: &mut Vec<String>,
) -> Result<Fireable, PatternError> {
    if visiting.iter().any(|v| v == name) {
        return Err(PatternError::CyclicFireable {
            pattern: pattern_name.into(),
            name: name.into(),
        });
    }
    let def = doc
        .fireables
        .get(name)
        .ok_or_else(|| PatternError::UnknownFireable {
            pattern: pattern_name.into(),
            name: name.into(),
        })?;

    visiting.push(name.to_string());
    let fireable = match def {
        FireableDef::Emitter => Fireable::Emitter,
        FireableDef::Ring { count } => Fireable::Ring { count: *count },
        FireableDef::Fan { count, spread } => Fireable::Fan {
            count: *count,
            spread: *spread,
        },
        FireableDef::Selector { options } => {
            let mut resolved = Vec::with_capacity(options.len());
            for option in options {
                resolved.push(match option {
                    Some(sub) => Some(build_fireable(doc, pattern_name, sub, visiting)?),
                    None => None,
                });
            }
            let selector =
                RandomSelector::new(resolved).map_err(|e| PatternError::InPattern {
                    pattern: pattern_name.into(),
                    source: Box::new(e),
                })?;
            Fireable::Selector(selector)
        }
    };
    visiting.pop();
    Ok(fireable)
}
