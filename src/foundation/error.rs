/// Result alias used across the crate.
pub type QijiResult<T> = Result<T, QijiError>;

/// Error type for every fallible operation in the crate.
#[derive(thiserror::Error, Debug)]
pub enum QijiError {
    /// Input failed a structural or range check.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene payload carries a version tag this build does not understand.
    #[error("incompatible scene: {0}")]
    Incompatible(String),

    /// The rendering backend could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// A persisted scene does not exist (or its id can never exist).
    #[error("not found: {0}")]
    NotFound(String),

    /// A scene could not be persisted.
    #[error("save failed: {0}")]
    SaveFailed(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually IO from the binary.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QijiError {
    /// Build a [`QijiError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QijiError::Incompatible`].
    pub fn incompatible(msg: impl Into<String>) -> Self {
        Self::Incompatible(msg.into())
    }

    /// Build a [`QijiError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QijiError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`QijiError::SaveFailed`].
    pub fn save_failed(msg: impl Into<String>) -> Self {
        Self::SaveFailed(msg.into())
    }

    /// Build a [`QijiError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
