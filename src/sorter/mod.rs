//! Constraint-based topological sequencing of named registrations.
//!
//! Values are registered under unique names with optional `before` /
//! `after` constraints. [`TopologicalSorter::sorted`] produces a single
//! total order that:
//!
//! - honors every constraint between registered names,
//! - keeps registration order wherever no constraint differentiates two
//!   nodes (insertion-stable),
//! - fails with a [`CycleError`] naming the nodes on the cycle when no
//!   order exists.
//!
//! Constraints against names that are not registered are soft: they are
//! ignored rather than rejected, so separately loaded extensions can hint
//! at an order relative to nodes that may not exist.

mod graph;
mod types;

pub use graph::TopologicalSorter;
pub use types::{Anchor, CycleError, Placement, SortError};
