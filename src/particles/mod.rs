//! Particle and point systems stepped by the host loop.
//!
//! Each system is a plain collection plus a pure-ish `step` function; none of them holds a clock
//! of its own, so the caller decides `dt` and time.

pub(crate) mod blossom;
pub(crate) mod firework;
pub(crate) mod ink;
pub(crate) mod snow;
