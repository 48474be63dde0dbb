//! # odds-rs — Discrete Weighted Distributions
//!
//! Model and manipulate discrete distributions whose weights ("odds") are
//! unnormalized non-negative numbers compared only relative to each other.
//!
//! ## Design Principles
//!
//! 1. **Immutable distributions**: every operation returns a new `Distribution`
//! 2. **One value type**: `Value` is a sum type, a nested distribution is just `Value::Dist`
//! 3. **One flattening engine**: construction, `map` and quantity mixing all merge the same way
//! 4. **Injectable randomness**: every sampling call has a `*_with(rng, ..)` twin
//!
//! ## Quick Start
//!
//! ```rust
//! use odds_rs::{builders::uniform, distribution, helpers, join, REST};
//!
//! # fn example() -> odds_rs::Result<()> {
//! // A biased coin, flipped twice, keeping only the mixed outcomes.
//! let b_coin = distribution! { Heads = 0.6, Tails = REST }?;
//! let fair = b_coin.power(2).filter(helpers::ne)?.map(helpers::first)?;
//! assert!((fair.probability(&"Heads".into()) - 0.5).abs() < 1e-12);
//!
//! // Weighted Cartesian product.
//! let game = join(&[&uniform(["H", "T"]), &uniform(1..=6)]);
//! assert_eq!(game.len(), 12);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Engines
//!
//! | Module | Role |
//! |--------|------|
//! | `distribution` | Weighted collection, flattening, construction |
//! | `transform` | `map`/`filter` and their tuple-spreading variants |
//! | `combinator` | `join`/`power` |
//! | `sampling` | `generate`, `monte_carlo` |
//! | `summary` | probability, expected value, utility, mode, normalize |
//! | `quantity` | `Solution`: weights as physical quantities |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod distribution;
pub mod transform;
pub mod combinator;
pub mod sampling;
pub mod summary;
pub mod quantity;
pub mod builders;
pub mod helpers;
pub mod render;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Odds, Value, REST};

// ============================================================================
// Re-exports: Engines
// ============================================================================

pub use distribution::{BuildOptions, Distribution};
pub use distribution::flatten::Entry;
pub use transform::Spec;
pub use combinator::join;
pub use sampling::{create_rng, Draws, DEFAULT_SIMULATIONS};
pub use quantity::Solution;
pub use render::{render, PlotOptions};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Empty distribution: {0}")]
    EmptyDistribution(String),

    #[error("Arity mismatch: expected a tuple value, got {got}")]
    ArityMismatch { got: String },

    #[error("Lookup miss: no entry for {0}")]
    LookupMiss(String),

    #[error("Non-numeric value: expected a number, got {got}")]
    NonNumericValue { got: String },

    #[error("Unsupported spec: {0}")]
    UnsupportedSpec(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

pub type Result<T> = std::result::Result<T, Error>;
