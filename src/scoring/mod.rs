//! Compatibility scoring
//!
//! This module provides the scoring seam and the deterministic weighted
//! scorer used everywhere a team needs a number.

pub mod scorer;
pub mod weights;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::scorer::*;
    pub use super::weights::*;
}
