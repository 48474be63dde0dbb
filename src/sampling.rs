//! Sampling engine: weighted random draws and Monte Carlo simulation.
//!
//! Draws use inverse-CDF selection: a cumulative-weight table is built
//! once per call, then each draw picks a uniform point in `[0, total)` and
//! binary-searches the first cumulative weight exceeding it.
//!
//! # Reproducibility
//!
//! The plain entry points use the thread-local generator. For
//! reproducible runs pass an explicit generator, e.g. [`create_rng`] with
//! a fixed seed, to the `*_with` variants.

use std::iter::FusedIterator;

use rand::rngs::{SmallRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::distribution::flatten::Merger;
use crate::distribution::Distribution;
use crate::model::weight::check_total;
use crate::model::Value;
use crate::{Error, Result};

/// Number of draws used by [`Distribution::monte_carlo`].
pub const DEFAULT_SIMULATIONS: usize = 100_000;

/// Creates a fast, seeded random number generator.
///
/// The sequence is deterministic for a given seed on the same platform.
///
/// ```
/// use odds_rs::{create_rng, distribution};
///
/// let d = distribution! { A = 1, B = 3 }.unwrap();
/// let a: Vec<_> = d.generate_with(create_rng(7), Some(5)).unwrap().collect();
/// let b: Vec<_> = d.generate_with(create_rng(7), Some(5)).unwrap().collect();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

// ============================================================================
// Cumulative table
// ============================================================================

/// Pre-computed cumulative weights for O(log n) repeated sampling.
#[derive(Debug, Clone, Default)]
struct CumulativeTable {
    cumulative: Vec<f64>,
    total: f64,
}

impl CumulativeTable {
    /// Returns `None` when no value can be drawn (total weight 0).
    fn new(distribution: &Distribution) -> Option<Self> {
        let total = distribution.total();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut cumulative = Vec::with_capacity(distribution.len());
        let mut running = 0.0;
        for (_, w) in distribution.iter() {
            running += w;
            cumulative.push(running);
        }
        // Floating-point drift: the last drawable value catches everything
        // up to total, trailing zero weights stay unreachable.
        let last = distribution.iter().rposition(|(_, w)| *w > 0.0)?;
        for c in &mut cumulative[last..] {
            *c = f64::INFINITY;
        }

        Some(Self { cumulative, total })
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let threshold = rng.random_range(0.0..self.total);
        let i = self.cumulative.partition_point(|&c| c <= threshold);
        i.min(self.cumulative.len() - 1)
    }
}

// ============================================================================
// Draws
// ============================================================================

/// Single-pass, pull-based stream of random draws.
///
/// Each draw is independent, with replacement, with probability
/// proportional to the weights captured when the stream was created.
/// Stop pulling at any point; there is nothing to release.
pub struct Draws<'d, R> {
    source: &'d Distribution,
    table: CumulativeTable,
    rng: R,
    remaining: Option<usize>,
}

impl<R: Rng> Iterator for Draws<'_, R> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self.remaining.as_mut() {
            Some(0) => return None,
            Some(n) => *n -= 1,
            None => {}
        }
        let index = self.table.sample(&mut self.rng);
        Some(self.source.pairs()[index].0.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<R: Rng> FusedIterator for Draws<'_, R> {}

// ============================================================================
// Distribution entry points
// ============================================================================

impl Distribution {
    /// Draw `n` values (or unboundedly many with `None`) using the
    /// thread-local generator.
    pub fn generate(&self, n: Option<usize>) -> Result<Draws<'_, ThreadRng>> {
        self.generate_with(rand::rng(), n)
    }

    /// Draw values with an explicit random source.
    ///
    /// Asking for zero draws always succeeds. Otherwise a distribution with
    /// total weight 0 fails with `EmptyDistribution`, and one whose total
    /// overflowed (a join of huge weights) fails with `InvalidWeight`.
    pub fn generate_with<R: Rng>(&self, rng: R, n: Option<usize>) -> Result<Draws<'_, R>> {
        let table = if n == Some(0) {
            CumulativeTable::default()
        } else {
            check_total(self.total())?;
            CumulativeTable::new(self).ok_or_else(|| {
                Error::EmptyDistribution(format!("cannot draw from {self}: total weight is 0"))
            })?
        };
        debug!(values = self.len(), draws = ?n, "generating draws");
        Ok(Draws { source: self, table, rng, remaining: n })
    }

    /// Estimate a derived distribution with [`DEFAULT_SIMULATIONS`] draws.
    ///
    /// See [`Distribution::monte_carlo_with`].
    pub fn monte_carlo<'d, F, I>(&'d self, simulate: F) -> Result<Distribution>
    where
        F: FnOnce(Draws<'d, ThreadRng>) -> I,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.monte_carlo_with(rand::rng(), DEFAULT_SIMULATIONS, simulate)
    }

    /// Feed `n` draws to `simulate` as a forward-only stream and count
    /// whatever it yields.
    ///
    /// `simulate` may consume several draws per output (or none) and may
    /// yield fewer values than it reads. The result weights are occurrence
    /// counts in first-seen order. Results are statistical estimates and
    /// vary from run to run unless the generator is seeded.
    ///
    /// ```
    /// use odds_rs::{create_rng, distribution, Value};
    ///
    /// let coin = distribution! { Heads = 1, Tails = 1 }.unwrap();
    /// // Length of runs of equal consecutive flips.
    /// let runs = coin.monte_carlo_with(create_rng(1), 1_000, |flips| {
    ///     let mut flips = flips.peekable();
    ///     std::iter::from_fn(move || {
    ///         let first = flips.next()?;
    ///         let mut len = 1;
    ///         while flips.next_if_eq(&first).is_some() {
    ///             len += 1;
    ///         }
    ///         Some(Value::from(len))
    ///     })
    /// }).unwrap();
    /// assert!(runs.probability(&Value::from(1)) > 0.4);
    /// ```
    pub fn monte_carlo_with<'d, R, F, I>(&'d self, rng: R, n: usize, simulate: F) -> Result<Distribution>
    where
        R: Rng,
        F: FnOnce(Draws<'d, R>) -> I,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let draws = self.generate_with(rng, Some(n))?;
        let mut counts = Merger::default();
        let mut outputs = 0usize;
        for value in simulate(draws) {
            counts.push(value.into(), 1.0);
            outputs += 1;
        }
        let empirical = counts.finish(self.options());
        debug!(draws = n, outputs, distinct = empirical.len(), "monte carlo finished");
        Ok(empirical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_generate_empty_fails() {
        let err = Distribution::empty().generate(Some(1)).err();
        assert!(matches!(err, Some(Error::EmptyDistribution(_))));
    }

    #[test]
    fn test_generate_zero_weight_fails() {
        let d = distribution! { A = 0 }.unwrap();
        assert!(d.generate(None).is_err());
    }

    #[test]
    fn test_generate_overflowed_total_fails() {
        let huge = distribution! { A = 1e200 }.unwrap();
        let err = huge.power(2).generate(Some(1)).err();
        assert!(matches!(err, Some(Error::InvalidWeight(_))));
    }

    #[test]
    fn test_generate_zero_of_empty() {
        assert_eq!(Distribution::empty().generate(Some(0)).unwrap().count(), 0);
    }

    #[test]
    fn test_generate_zero() {
        let d = distribution! { a = 5 }.unwrap();
        assert_eq!(d.generate(Some(0)).unwrap().count(), 0);
    }

    #[test]
    fn test_generate_single() {
        let d = distribution! { A = 0.1 }.unwrap();
        assert!(d.generate(Some(10)).unwrap().all(|v| v == Value::from("A")));
    }

    #[test]
    fn test_generate_count() {
        let d = distribution! { A = 0.1 }.unwrap();
        let draws = d.generate(Some(10)).unwrap();
        assert_eq!(draws.size_hint(), (10, Some(10)));
        assert_eq!(draws.count(), 10);
    }

    #[test]
    fn test_generate_unbounded_is_lazy() {
        let d = distribution! { A = 1, B = 1 }.unwrap();
        let taken: Vec<_> = d.generate_with(create_rng(3), None).unwrap().take(1000).collect();
        assert_eq!(taken.len(), 1000);
    }

    #[test]
    fn test_zero_weight_values_never_drawn() {
        let d = distribution! { A = 0, B = 1, C = 0 }.unwrap();
        let mut rng = create_rng(42);
        assert!(d
            .generate_with(&mut rng, Some(500))
            .unwrap()
            .all(|v| v == Value::from("B")));
    }

    #[test]
    fn test_generate_distribution() {
        let d = distribution! { A = 1, B = 3 }.unwrap();
        let draws: Vec<_> = d.generate_with(create_rng(42), Some(10_000)).unwrap().collect();
        let a = draws.iter().filter(|v| **v == Value::from("A")).count();
        let ratio = (draws.len() - a) as f64 / a as f64;
        assert!((ratio - 3.0).abs() < 0.5, "expected ratio ~3.0, got {ratio}");
    }

    #[test]
    fn test_monte_carlo_stream() {
        let d = distribution! { A = 1, B = 2 }.unwrap();
        let result = d
            .monte_carlo_with(create_rng(9), 100, |draws| {
                let seen: Vec<Value> = draws.collect();
                assert_eq!(seen.len(), 100);
                assert!(seen.iter().all(|v| *v == Value::from("A") || *v == Value::from("B")));
                vec!["A", "B", "C", "A"]
            })
            .unwrap();
        assert_eq!(
            result.pairs(),
            &[(Value::from("A"), 2.0), (Value::from("B"), 1.0), (Value::from("C"), 1.0)]
        );
    }

    #[test]
    fn test_monte_carlo_empty_fails() {
        let result = Distribution::empty().monte_carlo_with(create_rng(0), 10, |draws| draws);
        assert!(matches!(result, Err(Error::EmptyDistribution(_))));
    }
}
