//! Predicate ordering engine for configuration-driven dispatch.
//!
//! Provides the building blocks for ranking handlers by the predicates that
//! guard them:
//!
//! - **Sorter**: Stable topological sort over named entries with
//!   before/after constraints, `FIRST`/`LAST` sentinels and cycle reporting.
//! - **Predicates**: A registry of predicate factories in canonical order.
//!   The planner turns a request of predicate values into an evaluation
//!   plan with a priority order and a stable fingerprint, suggesting close
//!   matches for unknown names.
//! - **Tracer**: A scoped stack of in-flight registration call sites, used
//!   to report both sides of a configuration conflict.
//! - **Dispatching**: Ranks competing candidates by plan order and selects
//!   the first whose predicates hold.
//!
//! # Architecture
//!
//! `sorter` and `tracer` are independent leaves. `predicates` builds on
//! `sorter`; `dispatching` combines `predicates` and `tracer`. The crate
//! has no notion of what a predicate tests: values, context and inputs are
//! all type parameters supplied by consumers.

pub mod dispatching;
pub mod predicates;
pub mod sorter;
pub mod tracer;
