//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while persisting, loading or resuming from a checkpoint
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("Checkpoint serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Checkpoint deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot parsed but its parts disagree with each other
    #[error("Inconsistent checkpoint: {0}")]
    ValidationFailed(String),
}
