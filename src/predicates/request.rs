//! Requested predicate values for one candidate.

use super::types::{PredicateValue, ValueSpec};
use indexmap::IndexMap;

/// Mapping from predicate name to requested value(s).
///
/// Key order does not affect the resulting plan; it only fixes the order in
/// which unknown names are reported.
///
/// # Examples
///
/// ```
/// use u_predicate::predicates::{negate, PlanRequest, PredicateValue};
///
/// let request = PlanRequest::new()
///     .with("request_method", "GET")
///     .with_negated("xhr", "true")
///     .with_values("accept", [PredicateValue::Is("text/html"), negate("application/json")]);
/// assert_eq!(request.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest<V> {
    values: IndexMap<String, ValueSpec<V>>,
}

impl<V> PlanRequest<V> {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Requests a single value.
    pub fn with(self, name: impl Into<String>, value: V) -> Self {
        self.with_spec(name, ValueSpec::One(PredicateValue::Is(value)))
    }

    /// Requests a single negated value.
    pub fn with_negated(self, name: impl Into<String>, value: V) -> Self {
        self.with_spec(name, ValueSpec::One(PredicateValue::Not(value)))
    }

    /// Requests several alternative values under one name.
    pub fn with_values(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = PredicateValue<V>>,
    ) -> Self {
        self.with_spec(name, ValueSpec::Seq(values.into_iter().collect()))
    }

    /// Requests `spec` under `name`, replacing earlier values.
    pub fn with_spec(mut self, name: impl Into<String>, spec: ValueSpec<V>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Sets the values for `name`, returning the previous ones.
    pub fn insert(&mut self, name: impl Into<String>, spec: ValueSpec<V>) -> Option<ValueSpec<V>> {
        self.values.insert(name.into(), spec)
    }

    /// Returns the values requested for `name`.
    pub fn get(&self, name: &str) -> Option<&ValueSpec<V>> {
        self.values.get(name)
    }

    /// Removes `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<ValueSpec<V>> {
        self.values.shift_remove(name)
    }

    /// Requested names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of requested names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> Default for PlanRequest<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, ValueSpec<V>)> for PlanRequest<V> {
    fn from_iter<T: IntoIterator<Item = (K, ValueSpec<V>)>>(iter: T) -> Self {
        let mut request = Self::new();
        for (name, spec) in iter {
            request.insert(name, spec);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::negate;

    #[test]
    fn test_builder() {
        let request = PlanRequest::new()
            .with("a", 1)
            .with_negated("b", 2)
            .with_values("c", [PredicateValue::Is(3), negate(4)]);

        assert_eq!(request.get("a"), Some(&ValueSpec::One(PredicateValue::Is(1))));
        assert_eq!(request.get("b"), Some(&ValueSpec::One(PredicateValue::Not(2))));
        assert_eq!(request.get("c").map(|s| s.values().len()), Some(2));
        assert_eq!(request.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let mut request = PlanRequest::new().with("a", 1);
        let old = request.insert("a", ValueSpec::One(PredicateValue::Is(2)));
        assert_eq!(old, Some(ValueSpec::One(PredicateValue::Is(1))));
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let request: PlanRequest<i32> = vec![
            ("x", ValueSpec::from(PredicateValue::Is(1))),
            ("y", ValueSpec::Seq(vec![PredicateValue::Is(2), negate(3)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(request.len(), 2);
        assert!(request.get("y").is_some_and(|s| s.values()[1].is_negated()));
    }

    #[test]
    fn test_remove() {
        let mut request = PlanRequest::new().with("a", 1).with("b", 2);
        assert!(request.remove("a").is_some());
        assert!(request.remove("a").is_none());
        assert!(!request.is_empty());
    }
}
