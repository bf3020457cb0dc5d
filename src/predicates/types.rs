//! Predicate capability, fingerprint fragments and requested values.

use std::fmt;

/// A named, value-parameterized condition.
///
/// Implementations live outside this crate ("request method is GET",
/// "header X is present", ...). The planner never evaluates predicates; it
/// only asks them for fingerprint fragments. Consumers evaluate them in the
/// planned order and stop at the first `false`.
///
/// # Type Parameters
///
/// * `I` - The input the predicate is evaluated against
///
/// # Examples
///
/// ```
/// use u_predicate::predicates::{Phash, Predicate};
///
/// struct MethodIs(String);
///
/// impl Predicate<String> for MethodIs {
///     fn description(&self) -> String {
///         format!("request_method = {}", self.0)
///     }
///     fn phash(&self) -> Phash {
///         self.description().into()
///     }
///     fn evaluate(&self, method: &String) -> bool {
///         *method == self.0
///     }
/// }
///
/// let pred = MethodIs("GET".into());
/// assert!(pred.evaluate(&"GET".to_string()));
/// ```
pub trait Predicate<I>: Send + Sync {
    /// Human-readable description.
    fn description(&self) -> String;

    /// Fingerprint fragment(s) identifying this predicate and its value.
    fn phash(&self) -> Phash;

    /// Evaluates the predicate against `input`.
    fn evaluate(&self, input: &I) -> bool;
}

/// An owned, type-erased predicate.
pub type BoxedPredicate<I> = Box<dyn Predicate<I>>;

/// Fingerprint output of a predicate: one fragment or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phash {
    One(String),
    Many(Vec<String>),
}

impl Phash {
    /// Normalizes to a sequence of fragments.
    pub fn into_fragments(self) -> Vec<String> {
        match self {
            Phash::One(fragment) => vec![fragment],
            Phash::Many(fragments) => fragments,
        }
    }
}

impl From<String> for Phash {
    fn from(fragment: String) -> Self {
        Phash::One(fragment)
    }
}

impl From<&str> for Phash {
    fn from(fragment: &str) -> Self {
        Phash::One(fragment.to_string())
    }
}

impl From<Vec<String>> for Phash {
    fn from(fragments: Vec<String>) -> Self {
        Phash::Many(fragments)
    }
}

/// Inverts the result of a wrapped predicate.
///
/// The fingerprint is the wrapped predicate's fingerprint, unchanged: a
/// negated and a plain predicate on the same value hash identically.
pub struct Negated<I> {
    inner: BoxedPredicate<I>,
}

impl<I> Negated<I> {
    /// Wraps `inner`.
    pub fn new(inner: BoxedPredicate<I>) -> Self {
        Self { inner }
    }

    /// The wrapped predicate.
    pub fn inner(&self) -> &dyn Predicate<I> {
        self.inner.as_ref()
    }
}

impl<I> Predicate<I> for Negated<I> {
    fn description(&self) -> String {
        format!("!{}", self.inner.description())
    }

    fn phash(&self) -> Phash {
        self.inner.phash()
    }

    fn evaluate(&self, input: &I) -> bool {
        !self.inner.evaluate(input)
    }
}

impl<I> fmt::Debug for Negated<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Negated")
            .field(&self.inner.description())
            .finish()
    }
}

/// One requested value, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue<V> {
    /// Match when the predicate holds.
    Is(V),
    /// Match when the predicate does not hold.
    Not(V),
}

impl<V> PredicateValue<V> {
    /// The raw value handed to the factory.
    pub fn value(&self) -> &V {
        match self {
            PredicateValue::Is(v) | PredicateValue::Not(v) => v,
        }
    }

    /// Returns `true` for [`PredicateValue::Not`].
    pub fn is_negated(&self) -> bool {
        matches!(self, PredicateValue::Not(_))
    }
}

impl<V> From<V> for PredicateValue<V> {
    fn from(value: V) -> Self {
        PredicateValue::Is(value)
    }
}

/// Marks `value` as negated.
///
/// ```
/// use u_predicate::predicates::{negate, PredicateValue};
///
/// assert_eq!(negate("POST"), PredicateValue::Not("POST"));
/// ```
pub fn negate<V>(value: V) -> PredicateValue<V> {
    PredicateValue::Not(value)
}

/// The values requested for one predicate name.
///
/// `One` carries a single value even when that value is itself
/// sequence-like; `Seq` carries alternative values, each of which builds
/// its own predicate instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec<V> {
    One(PredicateValue<V>),
    Seq(Vec<PredicateValue<V>>),
}

impl<V> ValueSpec<V> {
    /// Normalizes to a slice of values.
    pub fn values(&self) -> &[PredicateValue<V>] {
        match self {
            ValueSpec::One(value) => std::slice::from_ref(value),
            ValueSpec::Seq(values) => values,
        }
    }
}

impl<V> From<PredicateValue<V>> for ValueSpec<V> {
    fn from(value: PredicateValue<V>) -> Self {
        ValueSpec::One(value)
    }
}
