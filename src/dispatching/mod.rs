//! Priority dispatch among competing candidates.
//!
//! Several handlers may be registered for the same dispatch key, each with
//! its own predicate plan. A [`CandidateSet`] ranks them by plan order
//! (more specific first, registration order among equals) and dispatches
//! to the first whose predicates all hold.
//!
//! Fingerprints double as duplicate detection: registering a second
//! candidate with an identical predicate combination fails with a
//! conflict naming both registration sites.

mod engine;
mod types;

pub use engine::CandidateSet;
pub use types::Candidate;
