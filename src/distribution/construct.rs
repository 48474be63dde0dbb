//! Construction surface.
//!
//! Explicit pairs, mappings and keyword-style literals all funnel into the
//! same entry list and go through [`flatten`](super::flatten::flatten).
//! Input errors are reported before any distribution is returned.

use super::flatten::{flatten, resolve_rest, Entry};
use super::{BuildOptions, Distribution};
use crate::model::{Odds, Value};
use crate::Result;

impl Distribution {
    /// Build a distribution from `(value, odds)` entries.
    ///
    /// ```
    /// use odds_rs::{Distribution, Odds, Value, REST};
    ///
    /// let d = Distribution::new(vec![
    ///     (Value::from("Heads"), Odds::from(0.495)),
    ///     (Value::from("Tails"), Odds::from(0.495)),
    ///     (Value::from("Sideways"), REST),
    /// ]).unwrap();
    /// assert_eq!(d.len(), 3);
    /// ```
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        Self::with_options(entries, BuildOptions::default())
    }

    /// Build with explicit [`BuildOptions`].
    pub fn with_options<I>(entries: I, options: BuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let resolved = resolve_rest(entries.into_iter().collect())?;
        flatten(resolved, options)
    }

    /// Build from anything that yields `(value, odds)` pairs: slices of
    /// tuples, `Vec`s, or ordered maps such as `BTreeMap`.
    ///
    /// Unordered maps (`HashMap`) work too, but their iteration order
    /// becomes the pair order.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use odds_rs::{Distribution, REST};
    ///
    /// let coin = Distribution::from_pairs([("Heads", 9), ("Tails", 1)]).unwrap();
    /// assert_eq!(coin.total(), 10.0);
    ///
    /// let mut odds = BTreeMap::new();
    /// odds.insert("Loss", REST);
    /// odds.insert("Win", 0.25.into());
    /// let lottery = Distribution::from_pairs(odds).unwrap();
    /// assert_eq!(lottery.weight(&"Loss".into()), Some(0.75));
    /// ```
    pub fn from_pairs<I, V, O>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, O)>,
        V: Into<Value>,
        O: Into<Odds>,
    {
        Self::new(pairs.into_iter().map(|(v, o)| (v.into(), o.into())))
    }

    /// Pair-based construction with explicit [`BuildOptions`].
    pub fn from_pairs_with<I, V, O>(pairs: I, options: BuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (V, O)>,
        V: Into<Value>,
        O: Into<Odds>,
    {
        Self::with_options(pairs.into_iter().map(|(v, o)| (v.into(), o.into())), options)
    }
}

/// Keyword-style distribution literal.
///
/// Accepts `name = odds` (the name becomes a string value) or
/// `value => odds` entries. Evaluates to `Result<Distribution>`.
///
/// ```
/// use odds_rs::{distribution, REST};
///
/// let b_coin = distribution! { Heads = 0.6, Tails = REST }.unwrap();
/// assert!((b_coin.weight(&"Tails".into()).unwrap() - 0.4).abs() < 1e-12);
///
/// let dice = distribution! { 1 => 1, 2 => 1, 3 => 1 }.unwrap();
/// assert_eq!(dice.len(), 3);
/// ```
#[macro_export]
macro_rules! distribution {
    () => {
        $crate::Distribution::new(::std::vec::Vec::new())
    };
    ($($key:ident = $odds:expr),+ $(,)?) => {
        $crate::Distribution::new(::std::vec![
            $(($crate::Value::from(stringify!($key)), $crate::Odds::from($odds))),+
        ])
    };
    ($($value:expr => $odds:expr),+ $(,)?) => {
        $crate::Distribution::new(::std::vec![
            $(($crate::Value::from($value), $crate::Odds::from($odds))),+
        ])
    };
}
