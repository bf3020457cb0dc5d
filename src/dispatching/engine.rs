//! Candidate ranking engine.

use super::types::Candidate;
use crate::predicates::EvaluationPlan;
use crate::tracer::{ActionInfo, ActionTracer, ConflictError};

/// Handlers competing for the same dispatch key, in priority order.
///
/// Candidates are kept sorted by ascending plan order; equal orders keep
/// registration order. Two candidates with the same fingerprint are
/// indistinguishable at dispatch time, so the second is rejected with a
/// [`ConflictError`] naming both registration sites.
///
/// # Examples
///
/// ```ignore
/// let tracer = ActionTracer::new();
/// let mut views = CandidateSet::new(tracer.clone());
///
/// let plan = registry.plan(&ctx, &PlanRequest::new().with("request_method", "GET"))?;
/// u_predicate::traced!(tracer, views.add("get_view", plan))?;
///
/// let handler = views.select(&request);
/// ```
#[derive(Debug)]
pub struct CandidateSet<H, I> {
    candidates: Vec<Candidate<H, I>>,
    tracer: ActionTracer,
}

impl<H, I> CandidateSet<H, I> {
    /// Creates an empty set that attributes registrations through `tracer`.
    pub fn new(tracer: ActionTracer) -> Self {
        Self {
            candidates: Vec::new(),
            tracer,
        }
    }

    /// The tracer registrations are attributed through.
    pub fn tracer(&self) -> &ActionTracer {
        &self.tracer
    }

    /// Adds a candidate.
    ///
    /// The registration site is the outermost traced call in flight, or
    /// the caller's location when nothing is traced.
    #[track_caller]
    pub fn add(&mut self, handler: H, plan: EvaluationPlan<I>) -> Result<(), ConflictError> {
        let site = match self.tracer.origin() {
            Some(info) => info,
            None => ActionInfo::caller(),
        };

        if let Some(existing) = self
            .candidates
            .iter()
            .find(|c| c.plan().phash() == plan.phash())
        {
            tracing::debug!(phash = plan.phash(), "conflicting candidate rejected");
            return Err(ConflictError::new(
                plan.phash(),
                vec![existing.site().clone(), site],
            ));
        }

        let pos = self
            .candidates
            .partition_point(|c| c.order() <= plan.order());
        tracing::trace!(order = plan.order(), position = pos, "candidate added");
        self.candidates.insert(pos, Candidate::new(handler, plan, site));
        Ok(())
    }

    /// Candidates in the order they are attempted.
    pub fn candidates(&self) -> &[Candidate<H, I>] {
        &self.candidates
    }

    /// Handlers in the order they are attempted.
    pub fn handlers(&self) -> impl Iterator<Item = &H> {
        self.candidates.iter().map(Candidate::handler)
    }

    /// Returns the first handler whose predicates all hold for `input`.
    ///
    /// Returns `None` if no candidate matches.
    pub fn select(&self, input: &I) -> Option<&H> {
        self.candidates
            .iter()
            .find(|c| c.matches(input))
            .map(Candidate::handler)
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<H, I> Default for CandidateSet<H, I> {
    fn default() -> Self {
        Self::new(ActionTracer::new())
    }
}
