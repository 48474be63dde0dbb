//! Transform engine: `map`, `filter` and their tuple-spreading variants.
//!
//! The shape of the argument is a [`Spec`], resolved once per call into a
//! uniform `value -> result` function. Pair iteration, flattening and
//! merging never look at the argument shape.
//!
//! ## Map vs filter on lookups
//!
//! A lookup (mapping) argument treats a missing key differently:
//!
//! | Operation | Missing key |
//! |-----------|-------------|
//! | `map` | fails with `LookupMiss` |
//! | `filter` | multiplier 0 (the value is focused away) |

use hashbrown::{HashMap, HashSet};
use tracing::trace;

use crate::distribution::flatten::flatten;
use crate::distribution::Distribution;
use crate::model::Value;
use crate::{Error, Result};

type ValueFn<'a> = Box<dyn Fn(&Value) -> Result<Value> + 'a>;
type MultiplierFn<'a> = Box<dyn Fn(&Value) -> Result<f64> + 'a>;

// ============================================================================
// Spec
// ============================================================================

/// Argument accepted by [`Distribution::map_with`] and
/// [`Distribution::filter_with`].
pub enum Spec<'a> {
    /// Arbitrary function of the value.
    Func(ValueFn<'a>),
    /// Mapping from value to replacement (map) or multiplier (filter).
    Lookup(HashMap<Value, Value>),
    /// Filter only: multiplier 1 for members, 0 otherwise.
    Members(HashSet<Value>),
    /// Filter only: multiplier is the value's weight in this distribution.
    Weights(Distribution),
    /// Filter only: multiplier 1 for truthy values, 0 otherwise.
    Truthy,
}

impl<'a> Spec<'a> {
    pub fn func<F, R>(f: F) -> Self
    where
        F: Fn(&Value) -> R + 'a,
        R: Into<Value>,
    {
        Spec::Func(Box::new(move |v| Ok(f(v).into())))
    }

    pub fn try_func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + 'a,
    {
        Spec::Func(Box::new(f))
    }

    /// Lookup from explicit pairs, also the keyword-style form:
    /// `Spec::lookup([("water", 1.0), ("orange", 0.01)])`.
    pub fn lookup<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Spec::Lookup(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn members<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Spec::Members(values.into_iter().map(Into::into).collect())
    }

    pub fn weights(distribution: Distribution) -> Self {
        Spec::Weights(distribution)
    }

    fn kind(&self) -> &'static str {
        match self {
            Spec::Func(_) => "function",
            Spec::Lookup(_) => "lookup",
            Spec::Members(_) => "member list",
            Spec::Weights(_) => "distribution",
            Spec::Truthy => "truthiness",
        }
    }

    fn into_mapper(self) -> Result<ValueFn<'a>> {
        match self {
            Spec::Func(f) => Ok(f),
            Spec::Lookup(map) => Ok(Box::new(move |v| {
                map.get(v).cloned().ok_or_else(|| Error::LookupMiss(v.to_string()))
            })),
            other => Err(Error::UnsupportedSpec(format!(
                "map does not accept a {} argument",
                other.kind()
            ))),
        }
    }

    fn into_multiplier(self) -> MultiplierFn<'a> {
        match self {
            Spec::Func(f) => Box::new(move |v| f(v)?.as_multiplier()),
            Spec::Lookup(map) => Box::new(move |v| map.get(v).map_or(Ok(0.0), Value::as_multiplier)),
            Spec::Members(set) => Box::new(move |v| Ok(if set.contains(v) { 1.0 } else { 0.0 })),
            Spec::Weights(d) => Box::new(move |v| Ok(d.weight(v).unwrap_or(0.0))),
            Spec::Truthy => Box::new(|v| Ok(if v.is_truthy() { 1.0 } else { 0.0 })),
        }
    }
}

impl std::fmt::Debug for Spec<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spec::{}", self.kind())
    }
}

// ============================================================================
// Map
// ============================================================================

impl Distribution {
    /// Replace every value with `f(value)` and merge the results.
    ///
    /// If `f` returns a [`Value::Dist`], that value is split into the
    /// sub-distribution's outcomes (scaled by the original weight); an
    /// empty sub-distribution removes the value.
    pub fn map<F, R>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&Value) -> R,
        R: Into<Value>,
    {
        self.map_with(Spec::func(f))
    }

    /// [`Distribution::map`] with a fallible function.
    pub fn try_map<F>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        self.map_with(Spec::try_func(f))
    }

    /// Like `map`, but `f` receives the items of a tuple value.
    ///
    /// Fails with `ArityMismatch` on any non-tuple value.
    pub fn starmap<F, R>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&[Value]) -> R,
        R: Into<Value>,
    {
        self.map_with(Spec::try_func(|v| Ok(f(v.spread()?).into())))
    }

    pub fn map_with(&self, spec: Spec<'_>) -> Result<Distribution> {
        let mapper = spec.into_mapper()?;
        let mut entries = Vec::with_capacity(self.len());
        for (value, weight) in self.iter() {
            entries.push((mapper(value)?, *weight));
        }
        let mapped = flatten(entries, self.options())?;
        trace!(before = self.len(), after = mapped.len(), "mapped distribution");
        Ok(mapped)
    }
}

// ============================================================================
// Filter
// ============================================================================

impl Distribution {
    /// Multiply every weight by `f(value)`.
    ///
    /// `f` may return a bool (keep/drop) or a non-negative number. Weights
    /// only shrink or grow; call [`Distribution::normalize`] to get
    /// probabilities back to a total of 1.
    pub fn filter<F, R>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&Value) -> R,
        R: Into<Value>,
    {
        self.filter_with(Spec::func(f))
    }

    /// [`Distribution::filter`] with a fallible function.
    pub fn try_filter<F>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&Value) -> Result<Value>,
    {
        self.filter_with(Spec::try_func(f))
    }

    /// Like `filter`, but `f` receives the items of a tuple value.
    pub fn starfilter<F, R>(&self, f: F) -> Result<Distribution>
    where
        F: Fn(&[Value]) -> R,
        R: Into<Value>,
    {
        self.filter_with(Spec::try_func(|v| Ok(f(v.spread()?).into())))
    }

    /// Keep values whose truthiness is true, zero the rest.
    pub fn filter_truthy(&self) -> Result<Distribution> {
        self.filter_with(Spec::Truthy)
    }

    /// Values are unchanged, so no flattening or merging happens here,
    /// even for [`Value::Dist`] values.
    pub fn filter_with(&self, spec: Spec<'_>) -> Result<Distribution> {
        let multiplier = spec.into_multiplier();
        let mut pairs = Vec::with_capacity(self.len());
        for (value, weight) in self.iter() {
            let m = multiplier(value)?;
            pairs.push((value.clone(), weight * m));
        }
        Distribution::try_from_parts(pairs, self.options())
    }
}
