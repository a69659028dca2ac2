//! Qiji renders procedural greeting cards: a calligraphy horse logo drawn from seeded strokes, a
//! user-drawn constellation, and a New Year scene of blossoms, fireworks and snow.
//!
//! The crate is layered bottom-up:
//!
//! - Seeded [`Mulberry32`] randomness and polyline geometry
//! - Generators ([`generate_horse_strokes`], [`horse_template_points`])
//! - Particle systems ([`BlossomField`], [`spawn_burst`], [`create_snowflakes`])
//! - The [`MorphController`] and [`Morph`] pair
//! - Scene renderers recording into a [`Painter`], rasterized by [`CpuBackend`]
//! - Versioned payloads ([`SharedScene`]) persisted through a [`SceneStore`]
//! - Host-loop sessions ([`LogoSession`], [`NewYearSession`], [`ConstellationSession`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod generate;
pub(crate) mod particles;
/// Display lists, scene renderers, CPU rasterization and PNG export.
pub mod render;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, Size, SurfaceSize, Vec2,
};
pub use crate::foundation::error::{QijiError, QijiResult};
pub use crate::foundation::math::{
    clamp01, cubic_bezier, dist, dist2, lerp, lerp_point, polyline_length, resample_polyline,
    sample_cubic,
};
pub use crate::foundation::rng::Mulberry32;

pub use crate::animation::ease::ease_in_out_cubic;
pub use crate::animation::morph::{
    DEFAULT_MORPH_MS, Morph, MorphController, MorphState, Morphable,
};

pub use crate::generate::horse::{
    HorseStrokeParams, base_paths, drawing_rect, generate_horse_strokes,
};
pub use crate::generate::template::{
    DEFAULT_TEMPLATE_SEED, horse_template_points, horse_template_strokes, points_from_strokes,
};
pub use crate::generate::{Stroke, Variant};

pub use crate::particles::blossom::{
    BlossomField, BlossomKind, DEFAULT_BLOSSOM_SEED, PeachBlossom, StepClock,
    create_peach_blossoms, create_user_blossom, hit_radius, step_peach_blossoms,
};
pub use crate::particles::firework::{
    Burst, FireworkParticle, PALETTE as FIREWORK_PALETTE, spawn_burst, step_fireworks,
};
pub use crate::particles::ink::{
    DEFAULT_K, DEFAULT_MAX_DIST, Edge, INK_MAX_DIST, InkCanvas, InkMode, InkPoint, StrokeRef,
    animated_positions, build_knn_edges, build_stroke_edges, constellation_edges, dedupe_edges,
    noise, point_offset,
};
pub use crate::particles::snow::{Snowflake, create_snowflakes, step_snow};

pub use crate::render::backend::FrameRGBA;
pub use crate::render::constellation::{
    ConstellationStyle, ConstellationView, StarPalette, render_constellation, twinkle,
};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::effects::{render_blossoms, render_fireworks, render_snow};
pub use crate::render::logo::{LogoStrokes, LogoStyle, render_logo_card};
pub use crate::render::painter::{BlendMode, DrawOp, Painter, TextAlign};
pub use crate::render::text::{
    ApproxMeasure, CardText, FontMeasure, Template, TextBlock, TextMeasure, draw_card_text,
    layout_card_text, wrap_text,
};

pub use crate::scene::model::{
    BackgroundV2, CanvasV1, CardV1, ConstellationCardV2, LogoCardV1, LogoParamsV1,
    POINTS_PER_STROKE_RANGE, STROKE_COUNT_RANGE, SharedScene, StarPoint, TextV2,
};
pub use crate::scene::store::{
    DEFAULT_SHARE_DIR, FileStore, MemoryStore, SHARE_DIR_ENV, SceneStore, ShareId,
};

pub use crate::session::constellation::{ConstellationSession, GUIDE_DONE};
pub use crate::session::logo::{LOGO_MORPH_MS, LogoSession};
pub use crate::session::newyear::{MAX_STEP_S, NewYearOpts, NewYearSession};
