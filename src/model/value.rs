//! Universal value type carried by every weighted pair.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::weight::float_key;
use crate::distribution::Distribution;
use crate::{Error, Result};

/// A value in a distribution.
///
/// Covers the outcomes a distribution can hold:
/// - Scalars: Null, Bool, Int, Float, String
/// - Containers: Tuple (the value type produced by `join`/`power`)
/// - Nested: Dist, a whole distribution used as one value
///
/// `Value` is `Eq + Hash` so equal outcomes can be merged. Floats compare
/// by bit pattern with `-0.0` folded into `0.0` and every NaN equal to
/// every other NaN. `Int(1)` and `Float(1.0)` are distinct values.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Tuple(Vec<Value>),
    Dist(Arc<Distribution>),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Tuple(_) => "TUPLE",
            Value::Dist(_) => "DISTRIBUTION",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_tuple(&self) -> bool { matches!(self, Value::Tuple(_)) }
    pub fn is_distribution(&self) -> bool { matches!(self, Value::Dist(_)) }

    /// General truthiness: null, false, zero, and empty containers are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Tuple(t) => !t.is_empty(),
            Value::Dist(d) => !d.is_empty(),
        }
    }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Like [`Value::as_float`], but booleans count as 0 and 1.
    pub fn as_number(&self) -> Option<f64> {
        match self.as_bool() {
            Some(b) => Some(if b { 1.0 } else { 0.0 }),
            None => self.as_float(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Value::Dist(d) => Some(d),
            _ => None,
        }
    }

    /// Build a tuple value from anything convertible.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Tuple items, or `ArityMismatch` for any other value.
    pub fn spread(&self) -> Result<&[Value]> {
        self.as_tuple().ok_or_else(|| Error::ArityMismatch {
            got: self.type_name().into(),
        })
    }

    /// Interpret this value as a non-negative weight multiplier.
    ///
    /// Booleans are 1/0, numbers are used as-is, null is 0.
    pub fn as_multiplier(&self) -> Result<f64> {
        let m = if self.is_null() {
            0.0
        } else {
            self.as_number().ok_or_else(|| Error::NonNumericValue {
                got: self.type_name().into(),
            })?
        };
        if !m.is_finite() || m < 0.0 {
            return Err(Error::InvalidWeight(format!("multiplier {m} for value {self}")));
        }
        Ok(m)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl Value {
    fn numeric_op(
        &self,
        other: &Value,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Option<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => int_op(*a, *b).map(Value::Int),
            _ => Some(Value::Float(float_op(self.as_float()?, other.as_float()?))),
        }
    }

    pub fn checked_add(&self, other: &Value) -> Option<Value> {
        self.numeric_op(other, i64::checked_add, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Value) -> Option<Value> {
        self.numeric_op(other, i64::checked_sub, |a, b| a - b)
    }

    pub fn checked_mul(&self, other: &Value) -> Option<Value> {
        self.numeric_op(other, i64::checked_mul, |a, b| a * b)
    }

    pub fn abs(&self) -> Option<Value> {
        match self {
            Value::Int(i) => i.checked_abs().map(Value::Int),
            Value::Float(f) => Some(Value::Float(f.abs())),
            _ => None,
        }
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dist(a), Value::Dist(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => float_key(*f).hash(state),
            Value::String(s) => s.hash(state),
            Value::Tuple(items) => items.hash(state),
            Value::Dist(d) => d.hash(state),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<u32> for Value { fn from(v: u32) -> Self { Value::Int(v as i64) } }
impl From<usize> for Value { fn from(v: usize) -> Self { Value::Int(v as i64) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<&Value> for Value { fn from(v: &Value) -> Self { v.clone() } }
impl From<Distribution> for Value { fn from(v: Distribution) -> Self { Value::Dist(Arc::new(v)) } }
impl From<Arc<Distribution>> for Value { fn from(v: Arc<Distribution>) -> Self { Value::Dist(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::tuple(v) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}
impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self { Value::Tuple(vec![a.into(), b.into()]) }
}
impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self { Value::Tuple(vec![a.into(), b.into(), c.into()]) }
}

// ============================================================================
// Display
// ============================================================================

impl Value {
    /// Strings nested in containers are quoted so `("a, b")` and `(a, b)` differ.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    v.fmt_nested(f)?;
                }
                write!(f, ")")
            }
            Value::Dist(d) => write!(f, "{d}"),
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Value {
    /// Ordering between comparable values. Returns None for incompatible types.
    ///
    /// Numbers compare across Int/Float, tuples compare lexicographically.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Tuple(a), Value::Tuple(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y)? {
                        Ordering::Equal => continue,
                        unequal => return Some(unequal),
                    }
                }
                a.len().partial_cmp(&b.len())
            }
            _ => None,
        }
    }
}
