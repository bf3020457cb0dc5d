//! Registry and planning errors.

use crate::sorter::SortError;
use std::fmt;

/// A requested name that is not registered, with close matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPredicate {
    pub name: String,
    /// Registered names ranked by similarity, best first.
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.suggestions.is_empty() {
            write!(f, " (did you mean {})", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

fn join_unknown(unknown: &[UnknownPredicate]) -> String {
    unknown
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while registering predicates or building a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The request named predicates that are not registered.
    #[error("unknown predicate values: {}", join_unknown(.0))]
    UnknownPredicates(Vec<UnknownPredicate>),

    /// A factory rejected the value it was given.
    #[error("invalid value for predicate {name:?}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// The registry cannot hold another predicate.
    #[error("too many predicates: at most {max} can be registered")]
    TooManyPredicates { max: usize },

    /// Duplicate name or unsatisfiable ordering.
    #[error(transparent)]
    Sort(#[from] SortError),
}

impl ConfigurationError {
    /// The unknown names, if this is an unknown-predicate error.
    pub fn unknown(&self) -> &[UnknownPredicate] {
        match self {
            ConfigurationError::UnknownPredicates(unknown) => unknown,
            _ => &[],
        }
    }
}
