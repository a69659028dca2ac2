use std::borrow::Cow;

use crate::animation::ease::ease_in_out_cubic;
use crate::foundation::math::clamp01;

/// Default morph duration in milliseconds.
pub const DEFAULT_MORPH_MS: f64 = 850.0;

/// A value that can be blended toward another value of the same shape.
pub trait Morphable: Clone {
    /// `true` when `self` and `other` can be interpolated element by element.
    fn same_topology(&self, other: &Self) -> bool;

    /// `true` when there is nothing to interpolate.
    fn is_blank(&self) -> bool;

    /// Blend toward `other` at `t` in `(0, 1)`. Callers guarantee matching topology.
    fn lerp_to(&self, other: &Self, t: f64) -> Self;
}

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphState {
    /// Not interpolating.
    Idle,
    /// Interpolating since `start_ms`.
    Running {
        /// Host clock reading when the morph was triggered.
        start_ms: f64,
    },
}

/// Drives an eased `t` from 0 to 1 over a fixed duration.
///
/// `t` is 0 before the first trigger and stays at 1 once a run completes.
#[derive(Clone, Debug)]
pub struct MorphController {
    duration_ms: f64,
    state: MorphState,
    t: f64,
}

impl Default for MorphController {
    fn default() -> Self {
        Self::new(DEFAULT_MORPH_MS)
    }
}

impl MorphController {
    /// Create an idle controller. Non-positive or non-finite durations complete instantly.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            state: MorphState::Idle,
            t: 0.0,
        }
    }

    /// Start (or restart) a run at `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) {
        self.state = MorphState::Running { start_ms: now_ms };
        self.t = 0.0;
    }

    /// Advance to `now_ms` and return the eased progress.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let MorphState::Running { start_ms } = self.state else {
            return self.t;
        };
        let raw = if self.duration_ms.is_finite() && self.duration_ms > 0.0 {
            clamp01((now_ms - start_ms) / self.duration_ms)
        } else {
            1.0
        };
        self.t = ease_in_out_cubic(raw);
        if raw >= 1.0 {
            self.t = 1.0;
            self.state = MorphState::Idle;
        }
        self.t
    }

    /// Current eased progress.
    pub fn progress(&self) -> f64 {
        self.t
    }

    /// Current state.
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// `true` while a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self.state, MorphState::Running { .. })
    }

    /// `true` when consumers should blend rather than draw an endpoint.
    pub fn is_interpolating(&self) -> bool {
        self.t > 0.0 && self.t < 1.0
    }
}

/// Pair of endpoint values driven by a [`MorphController`].
#[derive(Clone, Debug)]
pub struct Morph<T: Morphable> {
    from: T,
    to: T,
    controller: MorphController,
}

impl<T: Morphable> Morph<T> {
    /// Create an idle morph between two values.
    pub fn new(from: T, to: T, controller: MorphController) -> Self {
        Self {
            from,
            to,
            controller,
        }
    }

    /// Both sets non-empty and of identical topology.
    pub fn ready(&self) -> bool {
        !self.from.is_blank() && !self.to.is_blank() && self.from.same_topology(&self.to)
    }

    /// Start value.
    pub fn from(&self) -> &T {
        &self.from
    }

    /// End value.
    pub fn to(&self) -> &T {
        &self.to
    }

    /// Controller driving this morph.
    pub fn controller(&self) -> &MorphController {
        &self.controller
    }

    /// Start a run toward `to` at `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) {
        self.controller.trigger(now_ms);
    }

    /// Replace both endpoints and restart the run.
    pub fn retarget(&mut self, from: T, to: T, now_ms: f64) {
        self.from = from;
        self.to = to;
        self.controller.trigger(now_ms);
    }

    /// Advance the controller. Returns 0 while not ready.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let t = self.controller.tick(now_ms);
        if self.ready() { t } else { 0.0 }
    }

    /// Value at an explicit progress `t`.
    ///
    /// `from` is returned unmodified when not ready or when `t <= 0`; `to` when `t >= 1`.
    pub fn sample(&self, t: f64) -> Cow<'_, T> {
        if !self.ready() || t <= 0.0 {
            return Cow::Borrowed(&self.from);
        }
        if t >= 1.0 {
            return Cow::Borrowed(&self.to);
        }
        Cow::Owned(self.from.lerp_to(&self.to, t))
    }

    /// Value at the controller's current progress.
    pub fn current(&self) -> Cow<'_, T> {
        self.sample(self.controller.progress())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/morph.rs"]
mod tests;
