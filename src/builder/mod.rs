//! Builder API for ergonomic engine construction.
//!
//! This module provides fluent builders and macros for creating engines
//! with minimal boilerplate while keeping transitions pure.

pub mod engine;
pub mod error;
pub mod macros;
pub mod transition;

pub use engine::EngineBuilder;
pub use error::BuildError;
pub use transition::TransitionBuilder;

use crate::core::{Action, State};
use crate::engine::Transition;

/// Create a transition that always moves to `state`.
///
/// # Example
///
/// ```
/// use refold::builder::constant_transition;
/// use refold::core::TaggedAction;
///
/// let reset = constant_transition::<i64, TaggedAction>("reset", 0);
/// assert_eq!((reset.apply)(&42, &TaggedAction::new("reset")), 0);
/// ```
pub fn constant_transition<S, A>(kind: impl Into<String>, state: S) -> Transition<S, A>
where
    S: State + 'static,
    A: Action + 'static,
{
    Transition::new(kind, move |_: &S, _: &A| state.clone())
}

/// Create a transition that accepts the action but leaves the state as is.
///
/// The dispatch is still recorded in history.
///
/// ```
/// use refold::builder::noop_transition;
/// use refold::core::TaggedAction;
///
/// let ping = noop_transition::<i64, TaggedAction>("ping");
/// assert_eq!((ping.apply)(&7, &TaggedAction::new("ping")), 7);
/// ```
pub fn noop_transition<S, A>(kind: impl Into<String>) -> Transition<S, A>
where
    S: State + 'static,
    A: Action + 'static,
{
    Transition::new(kind, |state: &S, _: &A| state.clone())
}
