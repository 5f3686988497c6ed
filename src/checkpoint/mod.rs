//! Checkpoint and resume support for engines.
//!
//! A checkpoint captures an engine's states, history and metadata so a
//! long-lived engine can survive a process restart. Transitions are code and
//! are re-supplied on resume.

use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Counters tracked by an engine across its lifetime
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// When the engine was created
    pub created_at: DateTime<Utc>,

    /// Last accepted dispatch, or creation time
    pub updated_at: DateTime<Utc>,

    /// Accepted dispatches
    pub dispatch_count: u64,

    /// Rejected dispatches
    pub rejected_count: u64,

    /// Accepted dispatches per action kind
    pub accepted_by_kind: HashMap<String, u64>,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            dispatch_count: 0,
            rejected_count: 0,
            accepted_by_kind: HashMap::new(),
        }
    }
}

/// Serializable snapshot of an engine.
/// Does NOT include transitions (not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State the engine was initialized with
    pub initial_state: S,

    /// State at checkpoint time
    pub current_state: S,

    /// Retained dispatch history
    pub history: StateHistory<S>,

    /// Engine counters
    pub metadata: EngineMetadata,
}

impl<S: State> Checkpoint<S> {
    /// Check that the checkpoint is internally consistent and readable by
    /// this version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        match self.history.last() {
            Some(last) if last.to != self.current_state => {
                return Err(CheckpointError::ValidationFailed(format!(
                    "last recorded state {:?} does not match current state {:?}",
                    last.to, self.current_state
                )));
            }
            None if self.history.capacity().is_none()
                && self.current_state != self.initial_state =>
            {
                return Err(CheckpointError::ValidationFailed(
                    "empty history but current state differs from initial state".to_string(),
                ));
            }
            _ => {}
        }

        if (self.history.len() as u64) > self.metadata.dispatch_count {
            return Err(CheckpointError::ValidationFailed(format!(
                "history holds {} records but only {} dispatches were accepted",
                self.history.len(),
                self.metadata.dispatch_count
            )));
        }

        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Serialize with bincode.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse and validate a binary checkpoint.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}
