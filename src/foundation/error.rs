/// Result alias used across the crate.
pub type BlendResult<T> = Result<T, BlendError>;

/// Error taxonomy for compositing.
///
/// `Configuration` is only produced while constructing a backend; a compositor that exists never
/// returns it. Every other variant is per-call and leaves the compositor usable.
#[derive(thiserror::Error, Debug)]
pub enum BlendError {
    /// Device, adapter, or compiled kernel unavailable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Sprite placement falls outside the background with wrap disabled.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// GPU texture or buffer allocation, upload, or readback failed.
    #[error("resource error: {0}")]
    Resource(String),

    /// A raster cannot be normalized to the RGBA8 layout.
    #[error("format error: {0}")]
    Format(String),

    /// Failure from a foreign library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlendError {
    /// Build a [`BlendError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BlendError::Bounds`].
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`BlendError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`BlendError::Format`].
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Return `true` when the error is fatal for the compositor that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
