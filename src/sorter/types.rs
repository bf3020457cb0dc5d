//! Anchors, placements and sorter errors.

use std::fmt;

/// A target of a `before` / `after` constraint.
///
/// `First` and `Last` are sentinels that exist in every sorter. A node
/// registered without constraints is implicitly placed after `First` and
/// before `Last`. A constrained node is placed by its constraints alone, so
/// `after(Last)` and `before(First)` pin it to either extreme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Sentinel preceding every default-placed node.
    First,
    /// Sentinel following every default-placed node.
    Last,
    /// A registered node, by name.
    ///
    /// Names that are not registered when sorting are ignored.
    Name(String),
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Anchor::Name(name.to_string())
    }
}

impl From<String> for Anchor {
    fn from(name: String) -> Self {
        Anchor::Name(name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::First => f.write_str("FIRST"),
            Anchor::Last => f.write_str("LAST"),
            Anchor::Name(name) => f.write_str(name),
        }
    }
}

/// Ordering constraints attached to one node.
///
/// # Examples
///
/// ```
/// use u_predicate::sorter::{Anchor, Placement};
///
/// let placement = Placement::new().after("header").before(Anchor::Last);
/// assert_eq!(placement.after, vec![Anchor::from("header")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// The node must precede each of these.
    pub before: Vec<Anchor>,
    /// The node must follow each of these.
    pub after: Vec<Anchor>,
}

impl Placement {
    /// Creates an unconstrained placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `before` target.
    pub fn before(mut self, anchor: impl Into<Anchor>) -> Self {
        self.before.push(anchor.into());
        self
    }

    /// Adds an `after` target.
    pub fn after(mut self, anchor: impl Into<Anchor>) -> Self {
        self.after.push(anchor.into());
        self
    }

    /// Returns `true` if neither side carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// The constraints cannot be satisfied by any total order.
///
/// Holds every node left unsorted that can reach a cycle, together with the
/// names it must sort before among those nodes. Nodes that are only blocked
/// downstream of cycles are not reported; a node between two cycles is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    dependencies: Vec<(String, Vec<String>)>,
}

impl CycleError {
    pub(crate) fn new(dependencies: Vec<(String, Vec<String>)>) -> Self {
        Self { dependencies }
    }

    /// Names of the nodes involved, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// `(name, must_sort_before)` pairs for every node involved.
    pub fn dependencies(&self) -> &[(String, Vec<String>)] {
        &self.dependencies
    }
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cyclic ordering constraints: ")?;
        for (i, (name, successors)) in self.dependencies.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name} sorts before [{}]", successors.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for CycleError {}

/// Errors raised by [`TopologicalSorter`](super::TopologicalSorter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// A node with this name is already registered.
    #[error("duplicate registration: {0:?} is already registered")]
    DuplicateName(String),

    /// The constraints contain a cycle.
    #[error(transparent)]
    Cycle(#[from] CycleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_from_str() {
        assert_eq!(Anchor::from("a"), Anchor::Name("a".into()));
        assert_eq!(Anchor::from(String::from("b")), Anchor::Name("b".into()));
    }

    #[test]
    fn test_anchor_display() {
        assert_eq!(Anchor::First.to_string(), "FIRST");
        assert_eq!(Anchor::Last.to_string(), "LAST");
        assert_eq!(Anchor::from("x").to_string(), "x");
    }

    #[test]
    fn test_placement_builder() {
        let p = Placement::new()
            .before("b")
            .before(Anchor::Last)
            .after("a");
        assert_eq!(p.before, vec![Anchor::from("b"), Anchor::Last]);
        assert_eq!(p.after, vec![Anchor::from("a")]);
        assert!(!p.is_unconstrained());
        assert!(Placement::new().is_unconstrained());
    }

    #[test]
    fn test_cycle_error_display() {
        let err = CycleError::new(vec![
            ("a".into(), vec!["b".into()]),
            ("b".into(), vec!["a".into()]),
        ]);
        assert_eq!(err.names(), vec!["a", "b"]);
        assert_eq!(
            err.to_string(),
            "cyclic ordering constraints: a sorts before [b]; b sorts before [a]"
        );
    }

    #[test]
    fn test_sort_error_wraps_cycle() {
        let cycle = CycleError::new(vec![("a".into(), vec!["a".into()])]);
        let err: SortError = cycle.clone().into();
        assert_eq!(err, SortError::Cycle(cycle));
        assert!(err.to_string().starts_with("cyclic ordering constraints"));
    }
}
