/// Convenience result type used across rigsprite.
pub type RigResult<T> = Result<T, RigError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`RigError::Config`] is meant to stop a program: it signals a static authoring
/// mistake in the rig or engine configuration. Per-frame conditions (no detection, short
/// keypoint sequences, missing part images) are recovered inside the engine and never
/// surface as errors.
#[derive(thiserror::Error, Debug)]
pub enum RigError {
    /// Malformed rig definition or engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A part image could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Surface or blit misuse while compositing.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RigError {
    /// Build a [`RigError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RigError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`RigError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RigError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
