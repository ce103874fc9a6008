/// Convenience result type used across scrollstage.
pub type ScrollstageResult<T> = Result<T, ScrollstageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Noisy runtime input is never an error: out-of-range progress is clamped and
/// non-finite progress is ignored. Only authoring mistakes surface here.
#[derive(thiserror::Error, Debug)]
pub enum ScrollstageError {
    /// Invalid stage configuration, detected at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A disposed resource handle was dereferenced through a checked lookup.
    #[error("lifecycle violation: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollstageError {
    /// Build a [`ScrollstageError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrollstageError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`ScrollstageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollstageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
