//! Quantity algebra: weights as physical amounts.
//!
//! A [`Solution`] is a distribution whose weights are absolute quantities
//! (volumes, masses) instead of relative likelihoods. Adding two solutions
//! pours one into the other: values are unioned and equal values sum their
//! amounts. This is neither flattening (which rescales nested totals) nor
//! join (which multiplies).
//!
//! ```
//! use odds_rs::Solution;
//!
//! let juice = Solution::new([("water", 200), ("orange", 600)]).unwrap();
//! let sugar_water = Solution::new([("water", 95), ("sugar", 5)]).unwrap();
//! let mix = (&juice + &(&sugar_water / 2.0).unwrap()).unwrap();
//! assert_eq!(mix.volume(), 850.0);
//! ```

use std::ops::{Add, Deref, Div, Mul};

use tracing::trace;

use crate::distribution::flatten::Merger;
use crate::distribution::{BuildOptions, Distribution};
use crate::model::weight::check_weight;
use crate::model::{Odds, Value};
use crate::transform::Spec;
use crate::{Error, Result};

/// A mixture of components with absolute amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution(Distribution);

impl Solution {
    /// Components and their amounts. A component may itself be a
    /// distribution, whose proportions are spread over the given amount.
    pub fn new<I, V, O>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, O)>,
        V: Into<Value>,
        O: Into<Odds>,
    {
        Distribution::from_pairs(components).map(Solution::from_distribution)
    }

    /// Mix solutions by ratio: each part contributes its own proportions
    /// scaled to `ratio` units, regardless of its volume.
    ///
    /// `mix([(juice, 1.0), (sugar_water, 1.0)])` has volume 2.
    pub fn mix<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Solution, f64)>,
    {
        let entries = parts
            .into_iter()
            .map(|(s, ratio)| (Value::from(s), Odds::Weight(ratio)));
        Distribution::with_options(entries, BuildOptions::default()).map(Solution::from_distribution)
    }

    /// Read a distribution's weights as amounts.
    pub fn from_distribution(distribution: Distribution) -> Self {
        Solution(distribution)
    }

    pub fn into_distribution(self) -> Distribution {
        self.0
    }

    /// Total amount.
    pub fn volume(&self) -> f64 {
        self.0.total()
    }

    /// Pour `other` into `self`.
    ///
    /// Fails with `InvalidWeight` if the combined volume overflows.
    pub fn combine(&self, other: &Solution) -> Result<Solution> {
        let mut merged = Merger::with_capacity(self.0.len() + other.0.len());
        for (value, amount) in self.0.iter().chain(other.0.iter()) {
            merged.push(value.clone(), *amount);
        }
        let combined = merged.try_finish(self.0.options())?;
        trace!(volume = combined.total(), components = combined.len(), "combined solutions");
        Ok(Solution(combined))
    }

    /// Multiply every amount by `factor`.
    pub fn scale(&self, factor: f64) -> Result<Solution> {
        check_weight(factor)?;
        let pairs = self.0.iter().map(|(v, w)| (v.clone(), w * factor)).collect();
        Distribution::try_from_parts(pairs, self.0.options()).map(Solution)
    }

    /// Divide every amount by `divisor`.
    pub fn divide(&self, divisor: f64) -> Result<Solution> {
        if divisor == 0.0 {
            return Err(Error::DivisionByZero(format!("cannot divide solution {} by 0", self.0)));
        }
        self.scale(1.0 / divisor)
    }

    /// Remove part of some components, e.g.
    /// `filter_with(Spec::lookup([("water", 1.0), ("orange", 0.01)]))`.
    pub fn filter_with(&self, spec: Spec<'_>) -> Result<Solution> {
        self.0.filter_with(spec).map(Solution)
    }
}

impl Deref for Solution {
    type Target = Distribution;

    fn deref(&self) -> &Distribution {
        &self.0
    }
}

impl From<Solution> for Value {
    fn from(s: Solution) -> Self {
        Value::from(s.into_distribution())
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add for &Solution {
    type Output = Result<Solution>;

    fn add(self, other: &Solution) -> Result<Solution> {
        self.combine(other)
    }
}

impl Add for Solution {
    type Output = Result<Solution>;

    fn add(self, other: Solution) -> Result<Solution> {
        self.combine(&other)
    }
}

impl Mul<f64> for &Solution {
    type Output = Result<Solution>;

    fn mul(self, factor: f64) -> Result<Solution> {
        self.scale(factor)
    }
}

impl Div<f64> for &Solution {
    type Output = Result<Solution>;

    fn div(self, divisor: f64) -> Result<Solution> {
        self.divide(divisor)
    }
}
