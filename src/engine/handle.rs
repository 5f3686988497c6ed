//! Engine handle that owns the current state and applies dispatches.

use crate::checkpoint::{Checkpoint, CheckpointError, EngineMetadata, CHECKPOINT_VERSION};
use crate::core::{Action, DispatchRecord, State, StateHistory};
use crate::engine::config::EngineConfig;
use crate::engine::error::DispatchError;
use crate::engine::observer::DispatchObserver;
use crate::engine::transition::Reducer;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// Accepting dispatches
    Active,
    /// Released; every dispatch and read fails
    Disposed,
}

enum Slot<S> {
    Active { initial: S, current: S },
    Disposed,
}

/// Handle owning one engine instance's state and lifecycle.
///
/// `dispatch` takes `&mut self`, so calls against one handle are serialized
/// by the borrow checker. Share a handle across threads by wrapping it in a
/// lock; independent handles need no coordination.
///
/// # Example
///
/// ```rust
/// use refold::core::TaggedAction;
/// use refold::engine::{DispatchError, Engine, Reducer};
///
/// let reducer = Reducer::new()
///     .on("increment", |count: &i64, _: &TaggedAction| count + 1)
///     .on("decrement", |count: &i64, _: &TaggedAction| count - 1);
///
/// let mut engine = Engine::initialize(reducer, 0);
/// assert_eq!(engine.dispatch(&TaggedAction::new("increment")), Ok(&1));
///
/// let err = engine.dispatch(&TaggedAction::new("bogus")).unwrap_err();
/// assert!(matches!(err, DispatchError::UnsupportedActionKind { .. }));
/// assert_eq!(engine.current_state(), Ok(&1));
///
/// engine.dispose();
/// assert_eq!(engine.current_state(), Err(DispatchError::EngineDisposed));
/// ```
pub struct Engine<S: State, A: Action> {
    reducer: Reducer<S, A>,
    slot: Slot<S>,
    history: StateHistory<S>,
    metadata: EngineMetadata,
    observers: Vec<Arc<dyn DispatchObserver<S>>>,
    config: EngineConfig,
}

impl<S: State, A: Action> Engine<S, A> {
    /// Create an active engine holding `initial` as its current state.
    pub fn initialize(reducer: Reducer<S, A>, initial: S) -> Self {
        Self::with_config(reducer, initial, EngineConfig::default())
    }

    /// Create an active engine with explicit configuration.
    pub fn with_config(reducer: Reducer<S, A>, initial: S, config: EngineConfig) -> Self {
        let history = match config.history_capacity {
            Some(capacity) => StateHistory::bounded(capacity),
            None => StateHistory::new(),
        };

        Self {
            reducer,
            slot: Slot::Active {
                current: initial.clone(),
                initial,
            },
            history,
            metadata: EngineMetadata::default(),
            observers: Vec::new(),
            config,
        }
    }

    /// Rebuild an active engine from a checkpoint.
    ///
    /// Transitions are code and are not part of a checkpoint, so the caller
    /// supplies the reducer again.
    pub fn resume(
        reducer: Reducer<S, A>,
        checkpoint: Checkpoint<S>,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let config = EngineConfig {
            history_capacity: checkpoint.history.capacity(),
        };

        Ok(Self {
            reducer,
            slot: Slot::Active {
                initial: checkpoint.initial_state,
                current: checkpoint.current_state,
            },
            history: checkpoint.history,
            metadata: checkpoint.metadata,
            observers: Vec::new(),
            config,
        })
    }

    /// Register an observer, returning the engine.
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver<S>>) -> Self {
        self.add_observer(observer);
        self
    }

    /// Register an observer on an existing engine.
    pub fn add_observer(&mut self, observer: Arc<dyn DispatchObserver<S>>) {
        self.observers.push(observer);
    }

    /// Apply `action` to the current state.
    ///
    /// On success the new state replaces the old one and is returned. On
    /// failure the state, history and dispatch count are left untouched.
    /// A panic inside a transition unwinds to the caller before anything is
    /// replaced.
    ///
    /// A disposed engine fails with `EngineDisposed` without touching its
    /// metadata or notifying observers.
    pub fn dispatch(&mut self, action: &A) -> Result<&S, DispatchError> {
        let kind = action.kind();

        let Slot::Active { current, .. } = &self.slot else {
            return Err(DispatchError::EngineDisposed);
        };

        let next = match self.reducer.reduce(current, action) {
            Ok(next) => next,
            Err(error) => {
                self.metadata.rejected_count += 1;
                for observer in &self.observers {
                    observer.on_rejected(kind, &error);
                }
                return Err(error);
            }
        };

        let Slot::Active { current, .. } = &mut self.slot else {
            return Err(DispatchError::EngineDisposed);
        };
        let from = std::mem::replace(current, next.clone());

        let now = Utc::now();
        self.metadata.dispatch_count += 1;
        self.metadata.updated_at = now;
        *self
            .metadata
            .accepted_by_kind
            .entry(kind.to_string())
            .or_insert(0) += 1;

        let record = DispatchRecord {
            sequence: self.metadata.dispatch_count,
            kind: kind.to_string(),
            from,
            to: next,
            timestamp: now,
        };
        for observer in &self.observers {
            observer.on_transition(&record);
        }
        self.history.push(record);

        self.current_state()
    }

    /// Present state, without side effects.
    pub fn current_state(&self) -> Result<&S, DispatchError> {
        match &self.slot {
            Slot::Active { current, .. } => Ok(current),
            Slot::Disposed => Err(DispatchError::EngineDisposed),
        }
    }

    /// State the engine was initialized with.
    pub fn initial_state(&self) -> Result<&S, DispatchError> {
        match &self.slot {
            Slot::Active { initial, .. } => Ok(initial),
            Slot::Disposed => Err(DispatchError::EngineDisposed),
        }
    }

    /// Release the state. Terminal; disposing twice is a no-op.
    pub fn dispose(&mut self) {
        self.slot = Slot::Disposed;
        self.history = StateHistory::new();
    }

    /// Current lifecycle phase.
    pub fn status(&self) -> EngineStatus {
        match self.slot {
            Slot::Active { .. } => EngineStatus::Active,
            Slot::Disposed => EngineStatus::Disposed,
        }
    }

    /// Whether `dispose` has been called.
    pub fn is_disposed(&self) -> bool {
        self.status() == EngineStatus::Disposed
    }

    /// Accepted dispatches, oldest first. Empty once disposed.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Dispatch counters and timestamps.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Registered transitions.
    pub fn reducer(&self) -> &Reducer<S, A> {
        &self.reducer
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot the engine for persistence.
    pub fn checkpoint(&self) -> Result<Checkpoint<S>, DispatchError> {
        let Slot::Active { initial, current } = &self.slot else {
            return Err(DispatchError::EngineDisposed);
        };

        Ok(Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: initial.clone(),
            current_state: current.clone(),
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

impl<S: State, A: Action> fmt::Debug for Engine<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("status", &self.status())
            .field("current", &self.current_state().ok())
            .field("reducer", &self.reducer)
            .field("dispatch_count", &self.metadata.dispatch_count)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, TaggedAction};
    use serde::{Deserialize, Serialize};
    use std::num::NonZeroUsize;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Mutex;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Counter {
        count: i64,
    }

    fn counter_reducer() -> Reducer<Counter, TaggedAction> {
        Reducer::new()
            .on("increment", |s: &Counter, _: &TaggedAction| Counter {
                count: s.count + 1,
            })
            .on("decrement", |s: &Counter, _: &TaggedAction| Counter {
                count: s.count - 1,
            })
    }

    #[derive(Default)]
    struct Recording {
        accepted: Mutex<Vec<String>>,
        rejected: Mutex<Vec<String>>,
    }

    impl DispatchObserver<Counter> for Recording {
        fn on_transition(&self, record: &DispatchRecord<Counter>) {
            self.accepted.lock().unwrap().push(record.kind.clone());
        }

        fn on_rejected(&self, kind: &str, _error: &DispatchError) {
            self.rejected.lock().unwrap().push(kind.to_string());
        }
    }

    #[test]
    fn dispatch_replaces_state() {
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 });

        let next = engine.dispatch(&TaggedAction::new("increment")).unwrap();
        assert_eq!(next, &Counter { count: 1 });
        assert_eq!(engine.current_state(), Ok(&Counter { count: 1 }));
        assert_eq!(engine.initial_state(), Ok(&Counter { count: 0 }));
    }

    #[test]
    fn unsupported_kind_leaves_state_and_history() {
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 });

        let result = engine.dispatch(&TaggedAction::new("bogus"));

        assert_eq!(
            result,
            Err(DispatchError::UnsupportedActionKind {
                kind: "bogus".to_string()
            })
        );
        assert_eq!(engine.current_state(), Ok(&Counter { count: 0 }));
        assert!(engine.history().is_empty());
        assert_eq!(engine.metadata().dispatch_count, 0);
        assert_eq!(engine.metadata().rejected_count, 1);
    }

    #[test]
    fn guard_rejection_leaves_state() {
        let reducer = counter_reducer().on_guarded(
            "decrement",
            Guard::on_state(|s: &Counter| s.count > 0),
            |s: &Counter, _: &TaggedAction| Counter { count: s.count - 1 },
        );
        let mut engine = Engine::initialize(reducer, Counter { count: 0 });

        let result = engine.dispatch(&TaggedAction::new("decrement"));

        assert!(matches!(result, Err(DispatchError::GuardRejected { .. })));
        assert_eq!(engine.current_state(), Ok(&Counter { count: 0 }));
    }

    #[test]
    fn history_records_accepted_dispatches() {
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 });

        engine.dispatch(&TaggedAction::new("increment")).unwrap();
        engine.dispatch(&TaggedAction::new("bogus")).unwrap_err();
        engine.dispatch(&TaggedAction::new("increment")).unwrap();
        engine.dispatch(&TaggedAction::new("decrement")).unwrap();

        let history = engine.history();
        assert_eq!(history.kinds(), vec!["increment", "increment", "decrement"]);
        assert_eq!(
            history.records().iter().map(|r| r.sequence).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(engine.metadata().accepted_by_kind.get("increment"), Some(&2));
        assert_eq!(engine.metadata().accepted_by_kind.get("decrement"), Some(&1));
    }

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn bounded_history_from_config() {
        let config = EngineConfig::default().with_history_capacity(capacity(2));
        let mut engine = Engine::with_config(counter_reducer(), Counter { count: 0 }, config);

        for _ in 0..5 {
            engine.dispatch(&TaggedAction::new("increment")).unwrap();
        }

        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.metadata().dispatch_count, 5);
        assert_eq!(engine.config().history_capacity, Some(capacity(2)));
    }

    #[test]
    fn direct_config_keeps_latest_record() {
        let config = EngineConfig {
            history_capacity: Some(capacity(1)),
        };
        let mut engine = Engine::with_config(counter_reducer(), Counter { count: 0 }, config);

        engine.dispatch(&TaggedAction::new("increment")).unwrap();
        engine.dispatch(&TaggedAction::new("increment")).unwrap();

        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history().last().map(|r| r.sequence), Some(2));
        assert!(NonZeroUsize::new(0).is_none());
    }

    #[test]
    fn disposed_engine_rejects_everything() {
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 });
        engine.dispose();

        assert!(engine.is_disposed());
        assert_eq!(engine.status(), EngineStatus::Disposed);
        assert_eq!(
            engine.dispatch(&TaggedAction::new("increment")),
            Err(DispatchError::EngineDisposed)
        );
        assert_eq!(engine.current_state(), Err(DispatchError::EngineDisposed));
        assert!(matches!(
            engine.checkpoint(),
            Err(DispatchError::EngineDisposed)
        ));

        engine.dispose();
        assert!(engine.is_disposed());
    }

    #[test]
    fn disposed_dispatch_is_silent() {
        let observer = Arc::new(Recording::default());
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 })
            .with_observer(observer.clone());
        engine.dispose();

        let result = engine.dispatch(&TaggedAction::new("increment"));

        assert_eq!(result, Err(DispatchError::EngineDisposed));
        assert_eq!(engine.metadata().rejected_count, 0);
        assert_eq!(engine.metadata().dispatch_count, 0);
        assert!(observer.accepted.lock().unwrap().is_empty());
        assert!(observer.rejected.lock().unwrap().is_empty());
    }

    #[test]
    fn observers_see_both_outcomes() {
        let observer = Arc::new(Recording::default());
        let mut engine = Engine::initialize(counter_reducer(), Counter { count: 0 })
            .with_observer(observer.clone());

        engine.dispatch(&TaggedAction::new("increment")).unwrap();
        engine.dispatch(&TaggedAction::new("bogus")).unwrap_err();

        assert_eq!(*observer.accepted.lock().unwrap(), vec!["increment"]);
        assert_eq!(*observer.rejected.lock().unwrap(), vec!["bogus"]);
    }

    #[test]
    fn panicking_transition_leaves_state() {
        let reducer = counter_reducer().on("explode", |_: &Counter, _: &TaggedAction| {
            panic!("transition failed")
        });
        let mut engine = Engine::initialize(reducer, Counter { count: 4 });

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = engine.dispatch(&TaggedAction::new("explode"));
        }));

        assert!(result.is_err());
        assert_eq!(engine.current_state(), Ok(&Counter { count: 4 }));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine<Counter, TaggedAction>>();
    }
}
