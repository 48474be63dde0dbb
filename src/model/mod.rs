//! # Distribution Model
//!
//! Pure data shared by every engine: the value sum type and the odds
//! accepted at construction time.
//!
//! Design rule: no sampling, no flattening, no rendering here.
//! This module is pure data, no state.

pub mod value;
pub mod weight;

pub use value::Value;
pub use weight::{kahan_sum, Odds, REST, REST_TOLERANCE};
