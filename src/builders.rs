//! Named constructors.
//!
//! Thin builders that produce construction entries and hand them to the
//! flattening engine. None of them can fail: their weights are always
//! valid and split a total of 1.

use crate::combinator::join;
use crate::distribution::flatten::expand;
use crate::distribution::{BuildOptions, Distribution};
use crate::model::Value;

/// Equal weight `1/n` for each item. Duplicate items merge.
///
/// ```
/// use odds_rs::builders::uniform;
///
/// let coin = uniform(["Heads", "Tails"]);
/// assert_eq!(coin.probability(&"Heads".into()), 0.5);
/// ```
pub fn uniform<I, V>(items: I) -> Distribution
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    uniform_with(items, BuildOptions::default())
}

/// [`uniform`] with explicit options, e.g. keeping distributions as values.
pub fn uniform_with<I, V>(items: I, options: BuildOptions) -> Distribution
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = items.into_iter().map(Into::into).collect();
    let weight = 1.0 / values.len().max(1) as f64;
    expand(values.into_iter().map(|v| (v, weight)).collect(), options).finish(options)
}

/// A single value with weight 1.
pub fn fixed<V: Into<Value>>(value: V) -> Distribution {
    let options = BuildOptions::default();
    expand(vec![(value.into(), 1.0)], options).finish(options)
}

/// Integers from `start` up to, but not including, `end`.
pub fn range(start: i64, end: i64) -> Distribution {
    uniform(start..end)
}

/// Integers from `start` up to and including `end`.
///
/// `count(1, 6)` is a six-sided die.
pub fn count(start: i64, end: i64) -> Distribution {
    uniform(start..=end)
}

/// Uniform over every ordering of `items`, each as a tuple.
///
/// Orderings are generated by position, so repeated items produce equal
/// tuples that merge.
pub fn permutations<I, V>(items: I) -> Distribution
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let items: Vec<Value> = items.into_iter().map(Into::into).collect();
    let mut orderings = Vec::new();
    let mut used = vec![false; items.len()];
    let mut current = Vec::with_capacity(items.len());
    permute(&items, &mut used, &mut current, &mut orderings);
    uniform(orderings)
}

// ============================================================================
// Common distributions
// ============================================================================

pub fn coin() -> Distribution {
    uniform(["Heads", "Tails"])
}

pub fn d4() -> Distribution { count(1, 4) }
pub fn d6() -> Distribution { count(1, 6) }
pub fn d8() -> Distribution { count(1, 8) }
pub fn d10() -> Distribution { count(1, 10) }
pub fn d12() -> Distribution { count(1, 12) }
pub fn d20() -> Distribution { count(1, 20) }
pub fn d100() -> Distribution { count(1, 100) }

/// Ace, 2 through 10 as integers, Jack, Queen, King.
pub fn card_ranks() -> Distribution {
    let mut ranks = vec![Value::from("Ace")];
    ranks.extend((2..=10).map(Value::Int));
    ranks.extend(["Jack", "Queen", "King"].map(Value::from));
    uniform(ranks)
}

pub fn card_suits() -> Distribution {
    uniform(["Clubs", "Diamonds", "Hearts", "Spades"])
}

/// 52 `(rank, suit)` tuples.
pub fn deck() -> Distribution {
    join(&[&card_ranks(), &card_suits()])
}

pub fn rock_paper_scissors() -> Distribution {
    uniform(["Rock", "Paper", "Scissors"])
}

/// Door contents in order, one car behind three doors.
pub fn monty_hall_doors() -> Distribution {
    permutations(["Goat", "Goat", "Car"])
}

/// Typical 6/49 lottery ticket.
pub fn lottery() -> Distribution {
    long_shot("Win", 1.0 / 13_983_816.0, "Loss")
}

pub fn powerball() -> Distribution {
    long_shot("Win", 1.0 / 292_201_338.0, "Loss")
}

/// Lifetime odds of being struck by lightning.
pub fn lightning_strike() -> Distribution {
    long_shot("Struck by lightning", 1.0 / 13_500.0, "Safe")
}

/// Lifetime odds of being killed by a meteorite.
pub fn meteorite() -> Distribution {
    long_shot("Killed by meteorite", 1.0 / 700_000.0, "Safe")
}

/// `hit` with probability `p`, `miss` with the rest.
fn long_shot(hit: &str, p: f64, miss: &str) -> Distribution {
    let options = BuildOptions::default();
    expand(vec![(hit.into(), p), (miss.into(), 1.0 - p)], options).finish(options)
}

fn permute(items: &[Value], used: &mut [bool], current: &mut Vec<Value>, out: &mut Vec<Value>) {
    if current.len() == items.len() {
        out.push(Value::Tuple(current.clone()));
        return;
    }
    for i in 0..items.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(items[i].clone());
        permute(items, used, current, out);
        current.pop();
        used[i] = false;
    }
}
