//! Transitions and the reducer registry.

use crate::core::{Action, Guard, State};
use crate::engine::error::DispatchError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for transition functions.
///
/// A transition is a pure function of the current state and the action. It
/// borrows both, so it cannot mutate either.
pub type TransitionFn<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// The transition registered for one action kind.
pub struct Transition<S: State, A: Action> {
    pub kind: String,
    pub guard: Option<Guard<S, A>>,
    pub apply: TransitionFn<S, A>,
}

impl<S: State, A: Action> Transition<S, A> {
    /// Create an unguarded transition.
    pub fn new<F>(kind: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            guard: None,
            apply: Arc::new(apply),
        }
    }

    /// Check if the guard, if any, allows this action (pure).
    pub fn allows(&self, state: &S, action: &A) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(state, action))
    }
}

impl<S: State, A: Action> Clone for Transition<S, A> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            guard: self.guard.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<S: State, A: Action> fmt::Debug for Transition<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("kind", &self.kind)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Registry mapping action kinds to pure transitions.
///
/// Registering a kind twice replaces the earlier transition.
///
/// # Example
///
/// ```rust
/// use refold::core::TaggedAction;
/// use refold::engine::{DispatchError, Reducer};
///
/// let reducer = Reducer::new()
///     .on("increment", |count: &i64, _: &TaggedAction| count + 1)
///     .on("decrement", |count: &i64, _: &TaggedAction| count - 1);
///
/// assert_eq!(reducer.reduce(&0, &TaggedAction::new("increment")), Ok(1));
/// assert_eq!(
///     reducer.reduce(&0, &TaggedAction::new("bogus")),
///     Err(DispatchError::UnsupportedActionKind { kind: "bogus".to_string() })
/// );
/// ```
pub struct Reducer<S: State, A: Action> {
    transitions: HashMap<String, Transition<S, A>>,
}

impl<S: State, A: Action> Reducer<S, A> {
    /// Create a reducer with no transitions.
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }

    /// Register an unguarded transition for `kind`.
    pub fn on<F>(self, kind: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.with_transition(Transition::new(kind, apply))
    }

    /// Register a transition that only runs when `guard` allows it.
    pub fn on_guarded<F>(self, kind: impl Into<String>, guard: Guard<S, A>, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        let mut transition = Transition::new(kind, apply);
        transition.guard = Some(guard);
        self.with_transition(transition)
    }

    /// Register a pre-built transition.
    pub fn with_transition(mut self, transition: Transition<S, A>) -> Self {
        self.transitions.insert(transition.kind.clone(), transition);
        self
    }

    /// Compute the next state without touching any engine (pure).
    ///
    /// Fails with `UnsupportedActionKind` for unregistered kinds and
    /// `GuardRejected` when the transition's guard refuses the action.
    pub fn reduce(&self, state: &S, action: &A) -> Result<S, DispatchError> {
        let kind = action.kind();
        let transition =
            self.transitions
                .get(kind)
                .ok_or_else(|| DispatchError::UnsupportedActionKind {
                    kind: kind.to_string(),
                })?;

        if !transition.allows(state, action) {
            return Err(DispatchError::GuardRejected {
                kind: kind.to_string(),
            });
        }

        Ok((transition.apply)(state, action))
    }

    /// Whether a transition is registered for `kind`.
    pub fn handles(&self, kind: &str) -> bool {
        self.transitions.contains_key(kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.transitions.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of registered transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no transitions are registered.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: State, A: Action> Default for Reducer<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, A: Action> Clone for Reducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
        }
    }
}

impl<S: State, A: Action> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("kinds", &self.kinds())
            .finish()
    }
}
