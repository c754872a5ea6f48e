/// Convenience result type used across paperfold.
pub type FoldResult<T> = Result<T, FoldError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FoldError {
    /// Invalid caller-provided geometry, request, or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while sampling or validating animation tracks.
    #[error("animation error: {0}")]
    Animation(String),

    /// The view snapshot could not be captured.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// The scene collaborator rejected an operation (unknown view, detached container).
    #[error("scene error: {0}")]
    Scene(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoldError {
    /// Build a [`FoldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FoldError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FoldError::Snapshot`] value.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Build a [`FoldError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
