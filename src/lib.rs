//! Refold: a pure reducer engine
//!
//! Refold separates state-transition logic from whatever drives it. A
//! reducer is a registry of pure functions `(state, action) -> state` keyed
//! by action kind; an engine owns the current state and replaces it on every
//! accepted dispatch.
//!
//! # Core Concepts
//!
//! - **State**: any cloneable, comparable, serializable value
//! - **Action**: a tagged value whose kind selects the transition
//! - **Reducer**: the registry of pure transitions, optionally guarded
//! - **Engine**: the handle that owns state, history and lifecycle
//!
//! # Example
//!
//! ```rust
//! use refold::core::TaggedAction;
//! use refold::engine::{DispatchError, Engine, Reducer};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! let reducer = Reducer::new()
//!     .on("increment", |s: &Counter, _: &TaggedAction| Counter { count: s.count + 1 })
//!     .on("decrement", |s: &Counter, _: &TaggedAction| Counter { count: s.count - 1 });
//!
//! let mut engine = Engine::initialize(reducer, Counter { count: 0 });
//!
//! let next = engine.dispatch(&TaggedAction::new("increment")).unwrap();
//! assert_eq!(next, &Counter { count: 1 });
//!
//! let err = engine.dispatch(&TaggedAction::new("bogus")).unwrap_err();
//! assert_eq!(err, DispatchError::UnsupportedActionKind { kind: "bogus".to_string() });
//! assert_eq!(engine.current_state(), Ok(&Counter { count: 1 }));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, EngineBuilder, TransitionBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{Action, DispatchRecord, Guard, State, StateHistory, TaggedAction};
pub use crate::engine::{
    DispatchError, DispatchObserver, Engine, EngineStatus, Reducer, Transition,
};
