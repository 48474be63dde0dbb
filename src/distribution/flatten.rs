//! Flattening engine.
//!
//! Turns raw construction entries into a canonical flat distribution:
//!
//! 1. Resolve the (at most one) REST weight to `1 − Σ(other weights)`.
//! 2. Expand nested distributions recursively. A nested distribution's
//!    weights are normalized to its own total and then scaled by the
//!    weight it was given.
//! 3. Merge equal values by summing weights, keeping first-seen order.
//!
//! A nested distribution with total weight 0 contributes its pairs with
//! weight 0, so an empty nested distribution contributes nothing.

use std::hash::BuildHasher;

use hashbrown::{DefaultHashBuilder, HashTable};
use tracing::trace;

use super::{BuildOptions, Distribution};
use crate::model::weight::check_weight;
use crate::model::{kahan_sum, Odds, Value, REST_TOLERANCE};
use crate::{Error, Result};

/// A raw construction entry.
pub type Entry = (Value, Odds);

// ============================================================================
// REST resolution
// ============================================================================

/// Validate weights and replace the REST marker with its numeric value.
pub fn resolve_rest(entries: Vec<Entry>) -> Result<Vec<(Value, f64)>> {
    let mut rest_at = None;
    for (i, (_, odds)) in entries.iter().enumerate() {
        match odds {
            Odds::Rest => {
                if rest_at.replace(i).is_some() {
                    return Err(Error::InvalidWeight(
                        "REST may be used at most once per construction".into(),
                    ));
                }
            }
            Odds::Weight(w) => {
                check_weight(*w)?;
            }
        }
    }

    let rest = match rest_at {
        Some(_) => {
            let explicit = kahan_sum(entries.iter().filter_map(|(_, odds)| odds.weight()));
            let rest = 1.0 - explicit;
            if rest < -REST_TOLERANCE {
                return Err(Error::InvalidWeight(format!(
                    "REST resolves to {rest}: explicit weights already sum to {explicit}"
                )));
            }
            rest.max(0.0)
        }
        None => 0.0,
    };

    Ok(entries
        .into_iter()
        .map(|(value, odds)| (value, odds.weight().unwrap_or(rest)))
        .collect())
}

// ============================================================================
// Expansion + merge
// ============================================================================

/// Flatten resolved entries into a distribution.
///
/// With `options.flatten == false`, [`Value::Dist`] entries are kept as
/// plain values. Fails with `InvalidWeight` when merged weights overflow.
pub fn flatten(entries: Vec<(Value, f64)>, options: BuildOptions) -> Result<Distribution> {
    let count = entries.len();
    let flat = expand(entries, options).try_finish(options)?;
    trace!(entries = count, pairs = flat.len(), total = flat.total(), "flattened entries");
    Ok(flat)
}

/// Expansion and merging without the final total check.
pub(crate) fn expand(entries: Vec<(Value, f64)>, options: BuildOptions) -> Merger {
    let mut merger = Merger::with_capacity(entries.len());
    for (value, weight) in entries {
        expand_into(&mut merger, value, weight, options.flatten);
    }
    merger
}

fn expand_into(merger: &mut Merger, value: Value, weight: f64, nested: bool) {
    match value {
        Value::Dist(inner) if nested => {
            let total = inner.total();
            for (v, w) in inner.iter() {
                let scaled = if total > 0.0 { weight * w / total } else { 0.0 };
                expand_into(merger, v.clone(), scaled, true);
            }
        }
        other => merger.push(other, weight),
    }
}

/// Insertion-ordered accumulator that merges equal values.
#[derive(Default)]
pub(crate) struct Merger {
    pairs: Vec<(Value, f64)>,
    index: HashTable<usize>,
    hasher: DefaultHashBuilder,
}

impl Merger {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Add `weight` to `value`, appending it if it has not been seen.
    pub(crate) fn push(&mut self, value: Value, weight: f64) {
        let Merger { pairs, index, hasher } = self;
        let hash = hasher.hash_one(&value);
        let found = index.find(hash, |&i| pairs[i].0 == value).copied();
        match found {
            Some(i) => pairs[i].1 += weight,
            None => {
                index.insert_unique(hash, pairs.len(), |&i| hasher.hash_one(&pairs[i].0));
                pairs.push((value, weight));
            }
        }
    }

    /// For weights that cannot overflow, such as counts or a split of 1.
    pub(crate) fn finish(self, options: BuildOptions) -> Distribution {
        Distribution::from_parts(self.pairs, options)
    }

    pub(crate) fn try_finish(self, options: BuildOptions) -> Result<Distribution> {
        Distribution::try_from_parts(self.pairs, options)
    }
}
