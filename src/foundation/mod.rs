//! Shared primitives: geometry re-exports, colors, errors, math helpers and the seeded RNG.

pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
pub(crate) mod rng;
