//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Guard, State};
use crate::engine::{Transition, TransitionFn};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, A: Action> {
    kind: Option<String>,
    guard: Option<Guard<S, A>>,
    apply: Option<TransitionFn<S, A>>,
}

impl<S: State + 'static, A: Action + 'static> TransitionBuilder<S, A> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            kind: None,
            guard: None,
            apply: None,
        }
    }

    /// Set the action kind this transition handles (required).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<S, A>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure over state and action (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &A) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add a guard using a closure over the state only (optional).
    pub fn when_state<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::on_state(predicate));
        self
    }

    /// Set the transition function (required).
    pub fn apply<F>(mut self, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.apply = Some(Arc::new(apply));
        self
    }

    /// Transition to a fixed state regardless of input.
    pub fn sets(self, state: S) -> Self {
        self.apply(move |_, _| state.clone())
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, A>, BuildError> {
        let kind = self.kind.ok_or(BuildError::MissingKind)?;
        let apply = self.apply.ok_or(BuildError::MissingApply)?;

        Ok(Transition {
            kind,
            guard: self.guard,
            apply,
        })
    }
}

impl<S: State + 'static, A: Action + 'static> Default for TransitionBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
