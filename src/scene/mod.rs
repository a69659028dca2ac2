//! Versioned card payloads and their persistence.
//!
//! Payloads are JSON objects tagged with an integer `version`; unknown versions are rejected as
//! incompatible rather than guessed at.

pub(crate) mod model;
pub(crate) mod store;
