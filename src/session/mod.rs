//! Host-loop state objects.
//!
//! A session owns everything one card needs between frames. The host calls `tick(now_ms)` with
//! its clock, forwards input, then records a frame with `render`. Sessions never read the wall
//! clock or own a surface.

pub(crate) mod constellation;
pub(crate) mod logo;
pub(crate) mod newyear;
