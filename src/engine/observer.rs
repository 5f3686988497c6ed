//! Observers notified after each dispatch.
//!
//! The engine never logs on its own. Callers that want logging, metrics or
//! re-render triggers register an observer.

use crate::core::{DispatchRecord, State};
use crate::engine::error::DispatchError;

/// Collaborator notified of dispatch outcomes.
///
/// Both hooks default to doing nothing. Hooks run synchronously after the
/// outcome is settled, so they observe but cannot alter it.
pub trait DispatchObserver<S: State>: Send + Sync {
    /// Called after an accepted dispatch replaced the state.
    fn on_transition(&self, _record: &DispatchRecord<S>) {}

    /// Called after a dispatch was rejected.
    fn on_rejected(&self, _kind: &str, _error: &DispatchError) {}
}

/// Observer that emits `tracing` events.
///
/// Accepted dispatches log at `debug`, rejections at `warn`.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    engine: String,
}

impl TracingObserver {
    /// Create an observer whose events carry `engine` as a field.
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("refold")
    }
}

impl<S: State> DispatchObserver<S> for TracingObserver {
    fn on_transition(&self, record: &DispatchRecord<S>) {
        tracing::debug!(
            engine = %self.engine,
            sequence = record.sequence,
            kind = %record.kind,
            changed = record.changed(),
            to = ?record.to,
            "dispatch accepted"
        );
    }

    fn on_rejected(&self, kind: &str, error: &DispatchError) {
        tracing::warn!(
            engine = %self.engine,
            kind = %kind,
            error = %error,
            "dispatch rejected"
        );
    }
}
