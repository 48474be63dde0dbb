//! Combinator: weighted Cartesian products.
//!
//! `join(&[d1, .., dk])` yields flat k-tuples computed directly over all k
//! inputs, so joining three distributions gives `(a, b, c)` and never
//! `((a, b), c)`. The first input varies slowest, like nested loops in
//! argument order.

use std::ops::Mul;

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::distribution::{BuildOptions, Distribution};
use crate::model::Value;

/// Weighted Cartesian product of `distributions`.
///
/// Every value is a `Value::Tuple` with one item per input and weight equal
/// to the product of the source weights. Inputs are used as-is: nested
/// distributions are not expanded here. Joining nothing yields the single
/// empty tuple with weight 1.
///
/// ```
/// use odds_rs::{distribution, join, Value};
///
/// let a = distribution! { A = 5, B = 10 }.unwrap();
/// let b = distribution! { B = 5, C = 10 }.unwrap();
/// let j = join(&[&a, &b]);
/// assert_eq!(j.pairs()[0], (Value::from(("A", "B")), 25.0));
/// assert_eq!(j.total(), a.total() * b.total());
/// ```
pub fn join(distributions: &[&Distribution]) -> Distribution {
    let options = distributions.first().map_or_else(BuildOptions::default, |d| d.options());
    if distributions.iter().any(|d| d.is_empty()) {
        return Distribution::from_parts(Vec::new(), options);
    }

    let arity = distributions.len();
    let capacity = distributions.iter().fold(1usize, |n, d| n.saturating_mul(d.len()));
    let mut pairs = Vec::with_capacity(capacity);
    let mut cursor: SmallVec<[usize; 8]> = smallvec![0; arity];

    loop {
        let mut weight = 1.0;
        let mut items = Vec::with_capacity(arity);
        for (d, &i) in distributions.iter().zip(cursor.iter()) {
            let (value, w) = &d.pairs()[i];
            weight *= w;
            items.push(value.clone());
        }
        pairs.push((Value::Tuple(items), weight));

        // Odometer step: the last input advances fastest.
        let mut pos = arity;
        loop {
            if pos == 0 {
                debug!(inputs = arity, pairs = pairs.len(), "joined distributions");
                return Distribution::from_parts(pairs, options);
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < distributions[pos].len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

impl Distribution {
    /// Join with itself `n` times, producing flat n-tuples.
    ///
    /// `power(0)` is the empty tuple with weight 1; `power(1)` wraps each
    /// value in a one-item tuple.
    pub fn power(&self, n: usize) -> Distribution {
        let copies = vec![self; n];
        join(&copies)
    }
}

impl Mul<usize> for &Distribution {
    type Output = Distribution;

    fn mul(self, n: usize) -> Distribution {
        self.power(n)
    }
}

impl Mul<&Distribution> for usize {
    type Output = Distribution;

    fn mul(self, d: &Distribution) -> Distribution {
        d.power(self)
    }
}
