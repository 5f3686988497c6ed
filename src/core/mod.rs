//! Core reducer types.
//!
//! This module contains the pure vocabulary of the engine:
//! - State values via the `State` trait
//! - Tagged actions via the `Action` trait and `TaggedAction`
//! - Guard predicates for transition control
//! - Immutable dispatch history
//!
//! Nothing in this module performs I/O or holds mutable state.

mod action;
mod guard;
mod history;
mod state;

pub use action::{Action, TaggedAction, KIND_FIELD};
pub use guard::Guard;
pub use history::{DispatchRecord, StateHistory};
pub use state::State;
