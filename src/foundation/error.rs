/// Convenience result type used across the crate.
pub type VinylResult<T> = Result<T, VinylError>;

/// Top-level error taxonomy used by the compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum VinylError {
    /// Invalid or corrupt image/font bytes (template, thumbnail or title font).
    #[error("decode error: {0}")]
    Decode(String),

    /// Degenerate dimensions that make the badge or canvas geometry undefined.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Failure while producing the output image bytes.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid caller-provided request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VinylError {
    /// Build a [`VinylError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`VinylError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`VinylError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`VinylError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the failure was caused by the request itself rather than the service.
    ///
    /// Request layers map this to a 4xx-style response and everything else to 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::Geometry(_) | Self::Validation(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
