//! Planner configuration.

/// Configuration for a [`PredicateRegistry`](super::PredicateRegistry).
///
/// Controls how unknown predicate names are reported.
///
/// # Examples
///
/// ```
/// use u_predicate::predicates::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_max_suggestions(5)
///     .with_similarity_cutoff(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Maximum number of suggestions per unknown name. 0 = none.
    pub max_suggestions: usize,

    /// Minimum normalized Levenshtein similarity, in `[0, 1]`, for a
    /// registered name to be suggested.
    pub similarity_cutoff: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 3,
            similarity_cutoff: 0.6,
        }
    }
}

impl PlannerConfig {
    /// Sets the maximum number of suggestions per unknown name.
    pub fn with_max_suggestions(mut self, n: usize) -> Self {
        self.max_suggestions = n;
        self
    }

    /// Sets the minimum similarity for a suggestion.
    pub fn with_similarity_cutoff(mut self, cutoff: f64) -> Self {
        self.similarity_cutoff = cutoff;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.similarity_cutoff) {
            return Err(format!(
                "similarity_cutoff must be in [0, 1], got {}",
                self.similarity_cutoff
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_suggestions, 3);
        assert!((config.similarity_cutoff - 0.6).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_cutoff() {
        assert!(PlannerConfig::default()
            .with_similarity_cutoff(1.5)
            .validate()
            .is_err());
        assert!(PlannerConfig::default()
            .with_similarity_cutoff(-0.1)
            .validate()
            .is_err());
        assert!(PlannerConfig::default()
            .with_similarity_cutoff(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_suggestions_is_valid() {
        assert!(PlannerConfig::default()
            .with_max_suggestions(0)
            .validate()
            .is_ok());
    }
}
