//! # Weighted Collection
//!
//! [`Distribution`] is an ordered set of `(Value, weight)` pairs with
//! pairwise-distinct values. Every public operation returns a new
//! distribution; none mutates in place.
//!
//! | Submodule | Role |
//! |-----------|------|
//! | `flatten` | REST resolution, nested expansion, duplicate merging |
//! | `construct` | Public constructors and the `distribution!` macro |

pub mod construct;
pub mod flatten;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::model::{kahan_sum, Value};
use crate::model::weight::{check_total, float_key};
use crate::Result;

// ============================================================================
// Build options
// ============================================================================

/// Options that control how entries become a distribution.
///
/// Options are inherited by every distribution derived from this one
/// (map, filter, normalize, join, Monte Carlo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Expand distributions given as values into their own pairs.
    ///
    /// With `false`, a distribution value is kept as an opaque
    /// [`Value::Dist`] outcome.
    pub flatten: bool,
}

impl BuildOptions {
    /// Keep nested distributions as values instead of expanding them.
    pub fn preserve_nested() -> Self {
        Self { flatten: false }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { flatten: true }
    }
}

// ============================================================================
// Distribution
// ============================================================================

/// A discrete distribution of values with unnormalized weights.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    pairs: Vec<(Value, f64)>,
    total: f64,
    options: BuildOptions,
}

impl Distribution {
    /// Wrap pairs that are already flat, merged and validated.
    pub(crate) fn from_parts(pairs: Vec<(Value, f64)>, options: BuildOptions) -> Self {
        let total = kahan_sum(pairs.iter().map(|(_, w)| *w));
        Self { pairs, total, options }
    }

    /// [`Distribution::from_parts`] for weights derived from caller data,
    /// failing with `InvalidWeight` when the total overflows.
    pub(crate) fn try_from_parts(pairs: Vec<(Value, f64)>, options: BuildOptions) -> Result<Self> {
        let total = check_total(kahan_sum(pairs.iter().map(|(_, w)| *w)))?;
        Ok(Self { pairs, total, options })
    }

    /// The distribution with no values and total weight 0.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[(Value, f64)] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Value, f64)> {
        self.pairs.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.pairs.iter().map(|(v, _)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Raw (unnormalized) weight of `value`, if present.
    pub fn weight(&self, value: &Value) -> Option<f64> {
        self.pairs.iter().find(|(v, _)| v == value).map(|(_, w)| *w)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.weight(value).is_some()
    }
}

impl<'d> IntoIterator for &'d Distribution {
    type Item = &'d (Value, f64);
    type IntoIter = std::slice::Iter<'d, (Value, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl IntoIterator for Distribution {
    type Item = (Value, f64);
    type IntoIter = std::vec::IntoIter<(Value, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

// ============================================================================
// Equality and hashing (pairs only, options are not part of identity)
// ============================================================================

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(other.pairs.iter())
                .all(|((va, wa), (vb, wb))| va == vb && float_key(*wa) == float_key(*wb))
    }
}

impl Eq for Distribution {}

impl Hash for Distribution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pairs.len().hash(state);
        for (value, weight) in &self.pairs {
            value.hash(state);
            float_key(*weight).hash(state);
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (value, weight)) in self.pairs.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{value}: {weight}")?;
        }
        write!(f, "}}")
    }
}
