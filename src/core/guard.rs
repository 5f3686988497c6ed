//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions evaluated before a transition runs. A
//! rejected guard leaves the state exactly as it was.

use super::action::Action;
use super::state::State;
use std::fmt;
use std::sync::Arc;

type Predicate<S, A> = Arc<dyn Fn(&S, &A) -> bool + Send + Sync>;

/// Pure predicate over the current state and the incoming action.
///
/// # Example
///
/// ```rust
/// use refold::core::{Guard, TaggedAction};
///
/// // Only accept withdrawals that keep the balance non-negative
/// let guard = Guard::new(|balance: &i64, action: &TaggedAction| {
///     action.field_as::<i64>("amount").is_some_and(|amount| amount <= *balance)
/// });
///
/// let withdraw = TaggedAction::new("withdraw").with("amount", 30);
/// assert!(guard.check(&50, &withdraw));
/// assert!(!guard.check(&10, &withdraw));
/// ```
pub struct Guard<S: State, A: Action> {
    predicate: Predicate<S, A>,
}

impl<S: State, A: Action> Guard<S, A> {
    /// Create a guard from a pure predicate.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &A) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Create a guard that only inspects the state.
    ///
    /// ```rust
    /// use refold::core::{Guard, TaggedAction};
    ///
    /// let positive: Guard<i64, TaggedAction> = Guard::on_state(|count: &i64| *count > 0);
    /// assert!(!positive.check(&0, &TaggedAction::new("decrement")));
    /// ```
    pub fn on_state<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::new(move |state, _action| predicate(state))
    }

    /// Check whether the transition may run.
    pub fn check(&self, state: &S, action: &A) -> bool {
        (self.predicate)(state, action)
    }
}

impl<S: State, A: Action> Clone for Guard<S, A> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State, A: Action> fmt::Debug for Guard<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaggedAction;

    #[test]
    fn guard_reads_action_payload() {
        let guard = Guard::new(|_state: &i64, action: &TaggedAction| {
            action.field_as::<i64>("amount").is_some_and(|n| n > 0)
        });

        assert!(guard.check(&0, &TaggedAction::new("add").with("amount", 1)));
        assert!(!guard.check(&0, &TaggedAction::new("add").with("amount", -1)));
        assert!(!guard.check(&0, &TaggedAction::new("add")));
    }

    #[test]
    fn state_guard_ignores_action() {
        let guard: Guard<i64, TaggedAction> = Guard::on_state(|count| *count < 10);

        assert!(guard.check(&9, &TaggedAction::new("anything")));
        assert!(!guard.check(&10, &TaggedAction::new("anything")));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard: Guard<i64, TaggedAction> = Guard::on_state(|count| count % 2 == 0);
        let action = TaggedAction::new("tick");

        assert_eq!(guard.check(&4, &action), guard.check(&4, &action));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard: Guard<i64, TaggedAction> = Guard::on_state(|count| *count == 1);
        let cloned = guard.clone();
        let action = TaggedAction::new("tick");

        assert!(cloned.check(&1, &action));
        assert!(!cloned.check(&2, &action));
    }
}
