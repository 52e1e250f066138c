/// Convenience result type used across spreadviz.
pub type SpreadResult<T> = Result<T, SpreadError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpreadError {
    /// Invalid caller-provided values or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or inconsistent input tables / epidemic dataset.
    #[error("data error: {0}")]
    Data(String),

    /// Errors raised by the scene graph or timeline while animating.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while serializing or rasterizing frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpreadError {
    /// Build a [`SpreadError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpreadError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`SpreadError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SpreadError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SpreadError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
