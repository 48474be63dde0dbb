//! Reusable map/filter arguments over tuple values.
//!
//! Each helper is a plain `fn(&Value) -> Value`, so it can be passed
//! straight to `map` or `filter`:
//!
//! ```
//! use odds_rs::builders::count;
//! use odds_rs::helpers;
//!
//! let d6 = count(1, 6);
//! let close = d6.power(2).map(helpers::difference).unwrap();
//! assert_eq!(close.len(), 6);
//! ```
//!
//! Helpers return `Value::Null` when the input is not a tuple of the
//! expected size or the items cannot be compared/combined.

use std::cmp::Ordering;

use crate::model::Value;

fn pair(value: &Value) -> Option<(&Value, &Value)> {
    match value.as_tuple()? {
        [a, b] => Some((a, b)),
        _ => None,
    }
}

fn compare_with(value: &Value, accept: fn(Ordering) -> bool) -> Value {
    pair(value)
        .and_then(|(a, b)| a.compare(b))
        .map_or(Value::Null, |ord| Value::Bool(accept(ord)))
}

// ============================================================================
// Comparisons
// ============================================================================

pub fn lt(value: &Value) -> Value { compare_with(value, Ordering::is_lt) }
pub fn le(value: &Value) -> Value { compare_with(value, Ordering::is_le) }
pub fn gt(value: &Value) -> Value { compare_with(value, Ordering::is_gt) }
pub fn ge(value: &Value) -> Value { compare_with(value, Ordering::is_ge) }

/// Equality of the two items (any types).
///
/// Comparable items are equal when they order as equal, so `(1, 1.0)` is
/// equal here just as it is for [`le`] and [`ge`]. Other items fall back
/// to value identity.
pub fn eq(value: &Value) -> Value {
    pair(value).map_or(Value::Null, |(a, b)| Value::Bool(same(a, b)))
}

pub fn ne(value: &Value) -> Value {
    pair(value).map_or(Value::Null, |(a, b)| Value::Bool(!same(a, b)))
}

fn same(a: &Value, b: &Value) -> bool {
    a.compare(b).map_or_else(|| a == b, Ordering::is_eq)
}

/// `(container, item)`: tuple membership or substring test.
pub fn contains(value: &Value) -> Value {
    match pair(value) {
        Some((Value::Tuple(items), item)) => Value::Bool(items.contains(item)),
        Some((Value::String(s), Value::String(needle))) => Value::Bool(s.contains(needle.as_str())),
        Some((Value::Dist(d), item)) => Value::Bool(d.contains(item)),
        _ => Value::Null,
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Sum of all items; `0` for the empty tuple.
pub fn sum(value: &Value) -> Value {
    fold(value, Value::Int(0), Value::checked_add)
}

/// Product of all items; `1` for the empty tuple.
pub fn product(value: &Value) -> Value {
    fold(value, Value::Int(1), Value::checked_mul)
}

fn fold(value: &Value, init: Value, op: fn(&Value, &Value) -> Option<Value>) -> Value {
    let Some(items) = value.as_tuple() else {
        return Value::Null;
    };
    items
        .iter()
        .try_fold(init, |acc, item| op(&acc, item))
        .unwrap_or(Value::Null)
}

pub fn sub(value: &Value) -> Value {
    pair(value).and_then(|(a, b)| a.checked_sub(b)).unwrap_or(Value::Null)
}

/// Absolute difference of the two items.
pub fn difference(value: &Value) -> Value {
    pair(value)
        .and_then(|(a, b)| a.checked_sub(b))
        .and_then(|d| d.abs())
        .unwrap_or(Value::Null)
}

// ============================================================================
// Projections
// ============================================================================

fn nth(value: &Value, n: usize) -> Value {
    value.as_tuple().and_then(|items| items.get(n)).cloned().unwrap_or(Value::Null)
}

pub fn first(value: &Value) -> Value { nth(value, 0) }
pub fn second(value: &Value) -> Value { nth(value, 1) }
pub fn third(value: &Value) -> Value { nth(value, 2) }

pub fn last(value: &Value) -> Value {
    value.as_tuple().and_then(<[Value]>::last).cloned().unwrap_or(Value::Null)
}
