//! Registry of named predicate factories.

use super::config::PlannerConfig;
use super::error::ConfigurationError;
use super::planner::MAX_PREDICATES;
use super::types::BoxedPredicate;
use crate::sorter::{Anchor, Placement, TopologicalSorter};
use std::fmt;
use std::sync::Arc;

/// Builds a predicate from a requested value and the caller's context.
///
/// A factory rejects a value it cannot use by returning `Err` with a reason.
pub type PredicateFactory<V, C, I> =
    Arc<dyn Fn(&V, &C) -> Result<BoxedPredicate<I>, String> + Send + Sync>;

/// Named predicate factories in canonical (cost) order.
///
/// Predicates are expected to be registered cheapest first. Ordering hints
/// map onto the sorter as `weighs_more_than = after` and
/// `weighs_less_than = before`.
///
/// # Type Parameters
///
/// * `V` - The value type handed to factories
/// * `C` - The context type handed to factories
/// * `I` - The input type built predicates evaluate
///
/// # Examples
///
/// ```
/// use u_predicate::predicates::{BoxedPredicate, Phash, Predicate, PredicateRegistry};
///
/// struct Equals(i64);
/// impl Predicate<i64> for Equals {
///     fn description(&self) -> String { format!("== {}", self.0) }
///     fn phash(&self) -> Phash { self.description().into() }
///     fn evaluate(&self, x: &i64) -> bool { *x == self.0 }
/// }
///
/// let mut registry = PredicateRegistry::<i64, (), i64>::new();
/// registry
///     .add("eq", |v: &i64, _: &()| Ok(Box::new(Equals(*v)) as BoxedPredicate<i64>), None, None)
///     .unwrap();
/// assert_eq!(registry.names(), vec!["eq"]);
/// ```
pub struct PredicateRegistry<V, C, I> {
    pub(super) sorter: TopologicalSorter<PredicateFactory<V, C, I>>,
    pub(super) config: PlannerConfig,
    last_added: Option<String>,
}

impl<V, C, I> PredicateRegistry<V, C, I> {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self {
            sorter: TopologicalSorter::new(),
            config: PlannerConfig::default(),
            last_added: None,
        }
    }

    /// Creates an empty registry with `config`, validating it first.
    pub fn with_config(config: PlannerConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Returns the planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Registers a predicate factory under `name`.
    ///
    /// Fails without modifying the registry when `name` is taken or the
    /// registry is full.
    pub fn add<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
        weighs_more_than: Option<Anchor>,
        weighs_less_than: Option<Anchor>,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&V, &C) -> Result<BoxedPredicate<I>, String> + Send + Sync + 'static,
    {
        if self.sorter.len() >= MAX_PREDICATES {
            return Err(ConfigurationError::TooManyPredicates {
                max: MAX_PREDICATES,
            });
        }

        let mut placement = Placement::new();
        if let Some(anchor) = weighs_more_than {
            placement = placement.after(anchor);
        }
        if let Some(anchor) = weighs_less_than {
            placement = placement.before(anchor);
        }

        let name = name.into();
        let factory: PredicateFactory<V, C, I> = Arc::new(factory);
        self.sorter.add(name.clone(), factory, placement)?;
        self.last_added = Some(name);
        Ok(())
    }

    /// Removes a predicate. Returns `false` if it was not registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.sorter.remove(name).is_some();
        if removed && self.last_added.as_deref() == Some(name) {
            self.last_added = None;
        }
        removed
    }

    /// Valid predicate names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.sorter.names()
    }

    /// Name of the most recent successful registration still present.
    pub fn last_added(&self) -> Option<&str> {
        self.last_added.as_deref()
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sorter.contains(name)
    }

    /// Returns the number of registered predicates.
    pub fn len(&self) -> usize {
        self.sorter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorter.is_empty()
    }
}

impl<V, C, I> Default for PredicateRegistry<V, C, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C, I> fmt::Debug for PredicateRegistry<V, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.sorter.names())
            .field("config", &self.config)
            .field("last_added", &self.last_added)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{Phash, Predicate};
    use crate::sorter::SortError;

    struct Always;
    impl Predicate<()> for Always {
        fn description(&self) -> String {
            "always".into()
        }
        fn phash(&self) -> Phash {
            "always".into()
        }
        fn evaluate(&self, _: &()) -> bool {
            true
        }
    }

    fn always(_: &u8, _: &()) -> Result<BoxedPredicate<()>, String> {
        Ok(Box::new(Always))
    }

    #[test]
    fn test_add_and_names() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        registry.add("b", always, None, None).unwrap();
        registry.add("a", always, None, None).unwrap();
        assert_eq!(registry.names(), vec!["b", "a"]);
        assert_eq!(registry.last_added(), Some("a"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
    }

    #[test]
    fn test_duplicate_leaves_registry_unchanged() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        registry.add("a", always, None, None).unwrap();
        registry.add("b", always, None, None).unwrap();
        let err = registry.add("a", always, None, None).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Sort(SortError::DuplicateName("a".into()))
        );
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.last_added(), Some("b"));
    }

    #[test]
    fn test_weighs_translate_to_order() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        registry.add("cheap", always, None, None).unwrap();
        registry
            .add("pricey", always, Some("cheap".into()), None)
            .unwrap();
        registry
            .add("cheapest", always, None, Some("cheap".into()))
            .unwrap();
        let order: Vec<&str> = registry
            .sorter
            .sorted()
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(order, vec!["cheapest", "cheap", "pricey"]);
    }

    #[test]
    fn test_capacity() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        for i in 0..MAX_PREDICATES {
            registry.add(format!("p{i}"), always, None, None).unwrap();
        }
        let err = registry.add("overflow", always, None, None).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::TooManyPredicates {
                max: MAX_PREDICATES
            }
        );
        assert_eq!(registry.len(), MAX_PREDICATES);
    }

    #[test]
    fn test_remove() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        registry.add("a", always, None, None).unwrap();
        registry.add("b", always, None, None).unwrap();
        assert!(registry.remove("b"));
        assert!(!registry.remove("b"));
        assert_eq!(registry.last_added(), None);
        assert_eq!(registry.names(), vec!["a"]);
    }

    #[test]
    fn test_with_config_validates() {
        let bad = PlannerConfig::default().with_similarity_cutoff(2.0);
        assert!(PredicateRegistry::<u8, (), ()>::with_config(bad).is_err());

        let good = PlannerConfig::default().with_max_suggestions(1);
        let registry = PredicateRegistry::<u8, (), ()>::with_config(good).unwrap();
        assert_eq!(registry.config().max_suggestions, 1);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = PredicateRegistry::<u8, (), ()>::new();
        registry.add("a", always, None, None).unwrap();
        assert!(format!("{registry:?}").contains("[\"a\"]"));
    }
}
