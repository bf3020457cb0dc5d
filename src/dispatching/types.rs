//! A ranked candidate handler.

use crate::predicates::EvaluationPlan;
use crate::tracer::ActionInfo;

/// A handler paired with its predicate plan and registration site.
///
/// # Type Parameters
///
/// * `H` - The handler type
/// * `I` - The input the plan's predicates evaluate
#[derive(Debug)]
pub struct Candidate<H, I> {
    handler: H,
    plan: EvaluationPlan<I>,
    site: ActionInfo,
}

impl<H, I> Candidate<H, I> {
    pub(crate) fn new(handler: H, plan: EvaluationPlan<I>, site: ActionInfo) -> Self {
        Self {
            handler,
            plan,
            site,
        }
    }

    /// The handler dispatched to when the plan matches.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The predicates guarding the handler.
    pub fn plan(&self) -> &EvaluationPlan<I> {
        &self.plan
    }

    /// Where this candidate was registered.
    pub fn site(&self) -> &ActionInfo {
        &self.site
    }

    /// Shorthand for `plan().order()`.
    pub fn order(&self) -> i64 {
        self.plan.order()
    }

    /// Returns `true` if every predicate of the plan holds for `input`.
    pub fn matches(&self, input: &I) -> bool {
        self.plan.evaluate(input)
    }
}
