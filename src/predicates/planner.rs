//! Priority scoring and fingerprinting of requested predicate sets.

use super::error::{ConfigurationError, UnknownPredicate};
use super::registry::PredicateRegistry;
use super::request::PlanRequest;
use super::types::{BoxedPredicate, Negated};
use crate::sorter::SortError;
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::fmt;

/// Order of a plan that requests no predicates; such candidates go last.
pub const MAX_ORDER: i64 = 1 << 30;

/// Largest registry size whose weights `1 << (n + 1)` fit a `u64` score.
pub const MAX_PREDICATES: usize = 62;

/// Fingerprint of an empty predicate set (hex SHA-256 of no input).
pub const DEFAULT_PHASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Built predicates for one candidate, with its priority and fingerprint.
///
/// Lower `order` is tried earlier. `phash` identifies the exact predicate
/// combination; `order` is only a heuristic and distinct combinations may
/// share it.
pub struct EvaluationPlan<I> {
    order: i64,
    predicates: Vec<BoxedPredicate<I>>,
    phash: String,
}

impl<I> EvaluationPlan<I> {
    /// Priority; lower is tried earlier.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Predicates in canonical order, cheapest first.
    pub fn predicates(&self) -> &[BoxedPredicate<I>] {
        &self.predicates
    }

    /// Hex fingerprint of the predicate combination.
    pub fn phash(&self) -> &str {
        &self.phash
    }

    /// Returns the number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns `true` if every predicate holds, stopping at the first miss.
    pub fn evaluate(&self, input: &I) -> bool {
        self.predicates.iter().all(|p| p.evaluate(input))
    }

    /// Descriptions of the predicates, in canonical order.
    pub fn descriptions(&self) -> Vec<String> {
        self.predicates.iter().map(|p| p.description()).collect()
    }

    /// Consumes the plan, returning `(order, predicates, phash)`.
    pub fn into_parts(self) -> (i64, Vec<BoxedPredicate<I>>, String) {
        (self.order, self.predicates, self.phash)
    }
}

impl<I> fmt::Debug for EvaluationPlan<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationPlan")
            .field("order", &self.order)
            .field("predicates", &self.descriptions())
            .field("phash", &self.phash)
            .finish()
    }
}

/// Converts the OR of all weights into an order.
///
/// Floor division; `score` never exceeds `2^62`, so nothing overflows.
fn order_of(score: u64, count: usize) -> i64 {
    (MAX_ORDER - score as i64).div_euclid(count as i64 + 1)
}

impl<V, C, I: 'static> PredicateRegistry<V, C, I> {
    /// Builds the predicates requested in `request` and scores them.
    ///
    /// Each registered name at canonical position `n` that appears in the
    /// request contributes, per value, weight `1 << (n + 1)` and its
    /// fingerprint fragments. The order is
    /// `(MAX_ORDER - (OR of weights)) / (count + 1)`: more predicates sort
    /// earlier, and among equal counts the occupied slots decide.
    ///
    /// The result depends only on the request's contents, never on the
    /// order its keys were inserted in.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownPredicates`] if the request names
    ///   unregistered predicates, with close matches for each.
    /// - [`ConfigurationError::InvalidValue`] if a factory rejects a value.
    /// - [`ConfigurationError::Sort`] if the ordering constraints are cyclic.
    pub fn plan(
        &self,
        context: &C,
        request: &PlanRequest<V>,
    ) -> Result<EvaluationPlan<I>, ConfigurationError> {
        let ordered = self.sorter.sorted().map_err(SortError::from)?;

        let mut hasher = Sha256::new();
        let mut predicates: Vec<BoxedPredicate<I>> = Vec::new();
        let mut weights: Vec<u64> = Vec::new();

        for (n, (name, factory)) in ordered.into_iter().enumerate() {
            let Some(spec) = request.get(name) else {
                continue;
            };
            for value in spec.values() {
                let built = factory(value.value(), context).map_err(|reason| {
                    ConfigurationError::InvalidValue {
                        name: name.to_string(),
                        reason,
                    }
                })?;
                let predicate: BoxedPredicate<I> = if value.is_negated() {
                    Box::new(Negated::new(built))
                } else {
                    built
                };
                for fragment in predicate.phash().into_fragments() {
                    hasher.update(fragment.as_bytes());
                }
                weights.push(1u64 << (n + 1));
                predicates.push(predicate);
            }
        }

        let unknown: Vec<UnknownPredicate> = request
            .names()
            .filter(|name| !self.sorter.contains(name))
            .map(|name| UnknownPredicate {
                name: name.to_string(),
                suggestions: self.suggest(name),
            })
            .collect();
        if !unknown.is_empty() {
            tracing::debug!(count = unknown.len(), "rejected plan with unknown predicates");
            return Err(ConfigurationError::UnknownPredicates(unknown));
        }

        let score = weights.iter().fold(0u64, |acc, w| acc | w);
        let order = order_of(score, predicates.len());
        let phash = hex::encode(hasher.finalize());

        tracing::debug!(order, count = predicates.len(), phash = %phash, "planned predicates");

        Ok(EvaluationPlan {
            order,
            predicates,
            phash,
        })
    }

    /// Plans every request independently.
    ///
    /// With the `parallel` feature the requests are planned on the rayon
    /// pool; results keep the input order either way.
    pub fn plan_all(
        &self,
        context: &C,
        requests: &[PlanRequest<V>],
    ) -> Vec<Result<EvaluationPlan<I>, ConfigurationError>>
    where
        V: Sync,
        C: Sync,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests
                .par_iter()
                .map(|request| self.plan(context, request))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            requests
                .iter()
                .map(|request| self.plan(context, request))
                .collect()
        }
    }
}

impl<V, C, I> PredicateRegistry<V, C, I> {
    /// Registered names similar to `name`, best first.
    ///
    /// Similarity is normalized Levenshtein; ties keep registration order.
    fn suggest(&self, name: &str) -> Vec<String> {
        let cutoff = self.config.similarity_cutoff;
        let mut scored: Vec<(f64, &str)> = self
            .sorter
            .names()
            .into_iter()
            .map(|candidate| (strsim::normalized_levenshtein(name, candidate), candidate))
            .filter(|(similarity, _)| *similarity >= cutoff)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(self.config.max_suggestions)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
