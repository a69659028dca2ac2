//! Display-list recording, scene renderers and the CPU backend.
//!
//! Scene renderers are pure functions that record [`painter::DrawOp`]s into a
//! [`painter::Painter`]; [`cpu::CpuBackend`] rasterizes a recorded list into a
//! [`backend::FrameRGBA`], and [`export`] turns frames into PNG files.

pub(crate) mod backend;
pub(crate) mod constellation;
pub(crate) mod cpu;
pub(crate) mod effects;
/// PNG export.
pub mod export;
pub(crate) mod logo;
pub(crate) mod painter;
pub(crate) mod text;
