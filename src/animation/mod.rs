//! Time-based interpolation: easing curves and the topology-checked morph controller.

pub(crate) mod ease;
pub(crate) mod morph;
