//! Pattern composition core
//!
//! Everything that decides *what* gets fired and *how* firing parameters
//! are transformed before a spawn is dispatched. This module must stay
//! pure and deterministic:
//! - No host-engine or rendering dependencies
//! - Randomness only through an injected random source
//! - Construction validates; fire-time never fails

pub mod descriptor;
pub mod error;
pub mod fireable;
pub mod modifier;
pub mod pipeline;

pub use descriptor::{SpawnDescriptor, SpawnRequest};
pub use error::PatternError;
pub use fireable::{FireContext, Fireable, RandomSelector, Trigger};
pub use modifier::Modifier;
pub use pipeline::{Pattern, Pipeline, PipelineNode};
