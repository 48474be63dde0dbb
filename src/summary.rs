//! Summarizer: read-only statistics over a distribution.
//!
//! Everything here divides by the total weight, so results are
//! probabilities regardless of how the weights were scaled. Ties in
//! [`Distribution::mode`] go to the first-seen value; use
//! [`Distribution::modes`] to get every tied value.

use crate::distribution::Distribution;
use crate::model::weight::check_total;
use crate::model::{kahan_sum, Value};
use crate::{Error, Result};

impl Distribution {
    /// Weight of `value` divided by the total weight; 0 if absent.
    pub fn probability(&self, value: &Value) -> f64 {
        if self.total() <= 0.0 {
            return 0.0;
        }
        self.weight(value).map_or(0.0, |w| w / self.total())
    }

    /// `(value, probability)` view used by renderers. Empty if the total is 0.
    pub fn probabilities(&self) -> impl Iterator<Item = (&Value, f64)> + '_ {
        let total = self.total();
        self.iter()
            .filter(move |_| total > 0.0)
            .map(move |(v, w)| (v, w / total))
    }

    /// Σ(value × weight) / total.
    ///
    /// Booleans count as 0/1. Any other non-numeric value fails with
    /// `NonNumericValue`. A distribution with total weight 0 has expected
    /// value 0.
    pub fn expected_value(&self) -> Result<f64> {
        let mut terms = Vec::with_capacity(self.len());
        for (value, weight) in self.iter() {
            let x = value.as_number().ok_or_else(|| Error::NonNumericValue {
                got: value.type_name().into(),
            })?;
            terms.push(x * weight);
        }
        Ok(self.weighted_mean(terms))
    }

    /// Σ(f(value) × weight) / total.
    pub fn utility<F>(&self, f: F) -> f64
    where
        F: Fn(&Value) -> f64,
    {
        self.weighted_mean(self.iter().map(|(v, w)| f(v) * w))
    }

    fn weighted_mean<I: IntoIterator<Item = f64>>(&self, terms: I) -> f64 {
        if self.total() <= 0.0 {
            return 0.0;
        }
        kahan_sum(terms) / self.total()
    }

    /// The value with the largest weight; the first one seen among ties.
    pub fn mode(&self) -> Option<&Value> {
        let mut best: Option<&(Value, f64)> = None;
        for pair in self.iter() {
            if best.is_none_or(|(_, w)| pair.1 > *w) {
                best = Some(pair);
            }
        }
        best.map(|(v, _)| v)
    }

    /// Every value tied for the largest weight, in first-seen order.
    pub fn modes(&self) -> Vec<&Value> {
        let max = self.iter().map(|(_, w)| *w).fold(f64::NEG_INFINITY, f64::max);
        self.iter().filter(|(_, w)| *w == max).map(|(v, _)| v).collect()
    }

    /// Same values, same order, weights divided by the total.
    ///
    /// Fails with `EmptyDistribution` when the total weight is 0 and with
    /// `InvalidWeight` when it overflowed.
    pub fn normalize(&self) -> Result<Distribution> {
        let total = check_total(self.total())?;
        if total <= 0.0 {
            return Err(Error::EmptyDistribution(format!(
                "cannot normalize {self}: total weight is 0"
            )));
        }
        let pairs = self.iter().map(|(v, w)| (v.clone(), w / total)).collect();
        Ok(Distribution::from_parts(pairs, self.options()))
    }
}
