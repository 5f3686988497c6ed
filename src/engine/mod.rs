//! The reducer engine.
//!
//! A `Reducer` maps action kinds to pure transitions; an `Engine` owns the
//! current state and replaces it on every accepted dispatch.
//!
//! # Lifecycle
//!
//! An engine starts `Active` and moves to `Disposed` only through an
//! explicit `dispose`. Disposal is terminal: later dispatches and reads fail
//! with `DispatchError::EngineDisposed`.

mod config;
mod error;
mod handle;
mod observer;
mod transition;

pub use config::EngineConfig;
pub use error::DispatchError;
pub use handle::{Engine, EngineStatus};
pub use observer::{DispatchObserver, TracingObserver};
pub use transition::{Reducer, Transition, TransitionFn};
