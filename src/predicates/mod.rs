//! Predicate registry and evaluation planning.
//!
//! A [`PredicateRegistry`] holds named predicate factories in canonical
//! order (presumed cheapest first, adjustable with `weighs_more_than` /
//! `weighs_less_than` hints). For each candidate handler the caller asks
//! for a plan:
//!
//! - **Predicates**: one instance per requested value, in canonical order,
//!   so consumers can stop at the first failing (cheapest) predicate.
//! - **Order**: a single comparable priority. Candidates with more
//!   predicates get a lower order and are tried first.
//! - **Fingerprint** (`phash`): a content hash identifying the exact
//!   predicate combination, used to spot duplicate registrations.
//!
//! The planner never evaluates a predicate. Values may be negated with
//! [`negate`], which inverts evaluation without changing the fingerprint.
//!
//! # Examples
//!
//! ```
//! use u_predicate::predicates::{BoxedPredicate, Phash, PlanRequest, Predicate, PredicateRegistry};
//!
//! struct MethodIs(String);
//! impl Predicate<String> for MethodIs {
//!     fn description(&self) -> String { format!("request_method = {}", self.0) }
//!     fn phash(&self) -> Phash { self.description().into() }
//!     fn evaluate(&self, method: &String) -> bool { *method == self.0 }
//! }
//!
//! fn method(value: &String, _: &()) -> Result<BoxedPredicate<String>, String> {
//!     Ok(Box::new(MethodIs(value.clone())))
//! }
//!
//! let mut registry = PredicateRegistry::new();
//! registry.add("request_method", method, None, None).unwrap();
//!
//! let plan = registry
//!     .plan(&(), &PlanRequest::new().with("request_method", "GET".to_string()))
//!     .unwrap();
//! assert!(plan.evaluate(&"GET".to_string()));
//! assert_eq!(plan.order(), (u_predicate::predicates::MAX_ORDER - 2) / 2);
//! ```

mod config;
mod error;
mod planner;
mod registry;
mod request;
mod types;

pub use config::PlannerConfig;
pub use error::{ConfigurationError, UnknownPredicate};
pub use planner::{EvaluationPlan, DEFAULT_PHASH, MAX_ORDER, MAX_PREDICATES};
pub use registry::{PredicateFactory, PredicateRegistry};
pub use request::PlanRequest;
pub use types::{negate, BoxedPredicate, Negated, Phash, Predicate, PredicateValue, ValueSpec};
