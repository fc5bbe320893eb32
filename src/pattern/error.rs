//! Construction-time error taxonomy
//!
//! Everything here is an authoring/configuration failure detected while a
//! pattern is built or loaded. Fire-time execution is total and has no
//! error path of its own: a validated pattern always yields zero or more
//! spawn requests.

use std::error::Error;
use std::fmt;

/// Why a pattern or fireable could not be constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Random selector built with no option slots at all
    EmptySelector,
    /// Ring or fan authored with a zero count
    EmptyBurst,
    /// Worst-case spawn count exceeds the per-trigger budget
    SpawnBudgetExceeded { worst_case: u32, limit: u32 },
    /// Authored node references a modifier that does not exist
    UnknownModifier { pattern: String, name: String },
    /// Authored node references a template that does not exist
    UnknownTemplate { pattern: String, name: String },
    /// Pattern or selector references a fireable that does not exist
    UnknownFireable { pattern: String, name: String },
    /// Fireable reference graph loops back on itself
    CyclicFireable { pattern: String, name: String },
    /// Authoring document failed to deserialize
    Parse(String),
    /// Inner construction error attributed to a named pattern
    InPattern {
        pattern: String,
        source: Box<PatternError>,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptySelector => write!(f, "random selector has no options"),
            PatternError::EmptyBurst => write!(f, "ring/fan fireable has a zero count"),
            PatternError::SpawnBudgetExceeded { worst_case, limit } => write!(
                f,
                "worst-case spawn count {worst_case} exceeds per-trigger limit {limit}"
            ),
            PatternError::UnknownModifier { pattern, name } => {
                write!(f, "pattern '{pattern}' references unknown modifier '{name}'")
            }
            PatternError::UnknownTemplate { pattern, name } => {
                write!(f, "pattern '{pattern}' references unknown template '{name}'")
            }
            PatternError::UnknownFireable { pattern, name } => {
                write!(f, "pattern '{pattern}' references unknown fireable '{name}'")
            }
            PatternError::CyclicFireable { pattern, name } => write!(
                f,
                "pattern '{pattern}': fireable '{name}' is part of a reference cycle"
            ),
            PatternError::Parse(msg) => write!(f, "authoring document parse error: {msg}"),
            PatternError::InPattern { pattern, source } => {
                write!(f, "pattern '{pattern}': {source}")
            }
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PatternError::InPattern { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_asset() {
        let err = PatternError::UnknownModifier {
            pattern: "boss_spiral".into(),
            name: "curve".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("boss_spiral"));
        assert!(msg.contains("curve"));
    }

    #[test]
    fn test_in_pattern_exposes_source() {
        let err = PatternError::InPattern {
            pattern: "volley".into(),
            source: Box::new(PatternError::EmptySelector),
        };
        assert!(err.to_string().contains("volley"));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some(PatternError::EmptySelector.to_string())
        );
    }
}
