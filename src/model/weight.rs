//! Odds given at construction time, and weight arithmetic.

use crate::{Error, Result};

/// Odds attached to a construction entry.
///
/// Weights are unnormalized and only meaningful relative to the other
/// weights of the same distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Odds {
    Weight(f64),
    /// Whatever makes the explicit weights of the same call sum to 1.
    Rest,
}

/// Shorthand for [`Odds::Rest`].
pub const REST: Odds = Odds::Rest;

/// Slack allowed when REST resolves to a tiny negative number from rounding.
pub const REST_TOLERANCE: f64 = 1e-12;

impl Odds {
    pub fn weight(&self) -> Option<f64> {
        match self {
            Odds::Weight(w) => Some(*w),
            Odds::Rest => None,
        }
    }

    pub fn is_rest(&self) -> bool { matches!(self, Odds::Rest) }
}

impl From<f64> for Odds { fn from(v: f64) -> Self { Odds::Weight(v) } }
impl From<f32> for Odds { fn from(v: f32) -> Self { Odds::Weight(v as f64) } }
impl From<i32> for Odds { fn from(v: i32) -> Self { Odds::Weight(v as f64) } }
impl From<i64> for Odds { fn from(v: i64) -> Self { Odds::Weight(v as f64) } }
impl From<u32> for Odds { fn from(v: u32) -> Self { Odds::Weight(v as f64) } }
impl From<usize> for Odds { fn from(v: usize) -> Self { Odds::Weight(v as f64) } }

/// Reject negative, NaN and infinite weights.
pub(crate) fn check_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidWeight(format!(
            "weights must be finite and non-negative, got {weight}"
        )));
    }
    Ok(weight)
}

/// Reject a total that overflowed `f64`.
///
/// Every weight is finite and non-negative, so a non-finite total means
/// the sum itself left the representable range.
pub(crate) fn check_total(total: f64) -> Result<f64> {
    if !total.is_finite() {
        return Err(Error::InvalidWeight(format!(
            "total weight overflows f64, got {total}"
        )));
    }
    Ok(total)
}

/// Bit pattern used for float equality and hashing.
///
/// `-0.0` folds into `0.0` and all NaNs share one key.
pub(crate) fn float_key(f: f64) -> u64 {
    if f == 0.0 {
        0.0_f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

/// Compensated (Kahan–Babuška–Neumaier) summation.
///
/// Keeps long runs of small weights from drifting when accumulated into
/// a total. An overflowing sum is returned as infinity, never NaN.
pub fn kahan_sum<I: IntoIterator<Item = f64>>(weights: I) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in weights {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    if sum.is_finite() { sum + c } else { sum }
}
