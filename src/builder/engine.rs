//! Builder for constructing engines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Action, Guard, State};
use crate::engine::{DispatchObserver, Engine, EngineConfig, Reducer, Transition};
use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing engines with a fluent API.
///
/// Unlike `Reducer::on`, which lets a later registration replace an earlier
/// one, the builder treats a repeated kind as a mistake. `build` reports
/// every problem it finds at once.
///
/// # Example
///
/// ```rust
/// use refold::builder::EngineBuilder;
/// use refold::core::TaggedAction;
///
/// let mut engine = EngineBuilder::<i64, TaggedAction>::new()
///     .initial(0)
///     .on("increment", |count, _| count + 1)
///     .on("decrement", |count, _| count - 1)
///     .history_capacity(64)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.dispatch(&TaggedAction::new("increment")), Ok(&1));
/// ```
pub struct EngineBuilder<S: State + 'static, A: Action + 'static> {
    initial: Option<S>,
    transitions: Vec<Transition<S, A>>,
    observers: Vec<Arc<dyn DispatchObserver<S>>>,
    config: EngineConfig,
    zero_capacity: bool,
    problems: Vec<BuildError>,
}

impl<S: State + 'static, A: Action + 'static> EngineBuilder<S, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            observers: Vec::new(),
            config: EngineConfig::default(),
            zero_capacity: false,
            problems: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Register an unguarded transition.
    pub fn on<F>(self, kind: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.add_transition(Transition::new(kind, apply))
    }

    /// Register a guarded transition.
    pub fn on_guarded<F>(self, kind: impl Into<String>, guard: Guard<S, A>, apply: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        let mut transition = Transition::new(kind, apply);
        transition.guard = Some(guard);
        self.add_transition(transition)
    }

    /// Add a transition using a builder.
    /// A builder that fails validation is reported by `build`.
    pub fn transition(mut self, builder: TransitionBuilder<S, A>) -> Self {
        match builder.build() {
            Ok(transition) => self.transitions.push(transition),
            Err(problem) => self.problems.push(problem),
        }
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, A>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, A>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Register an observer notified of every dispatch outcome.
    pub fn observer(mut self, observer: Arc<dyn DispatchObserver<S>>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Retain at most `capacity` dispatch records.
    /// Zero is reported by `build`.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity);
        self.zero_capacity = capacity.is_none();
        self.config.history_capacity = capacity;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self.zero_capacity = false;
        self
    }

    /// Collect every configuration problem instead of stopping at the first.
    fn validate(&self) -> Result<(), BuildError> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = self
            .problems
            .iter()
            .cloned()
            .map(|problem| Validation::fail(problem))
            .collect();

        checks.push(if self.initial.is_some() {
            Validation::success(())
        } else {
            Validation::fail(BuildError::MissingInitialState)
        });

        checks.push(if self.transitions.is_empty() && self.problems.is_empty() {
            Validation::fail(BuildError::NoTransitions)
        } else {
            Validation::success(())
        });

        if self
            .transitions
            .iter()
            .any(|transition| transition.kind.trim().is_empty())
        {
            checks.push(Validation::fail(BuildError::EmptyKind));
        }

        let mut seen = HashSet::new();
        let duplicates: BTreeSet<&str> = self
            .transitions
            .iter()
            .map(|transition| transition.kind.as_str())
            .filter(|kind| !seen.insert(*kind))
            .collect();
        for kind in duplicates {
            checks.push(Validation::fail(BuildError::DuplicateKind {
                kind: kind.to_string(),
            }));
        }

        if self.zero_capacity {
            checks.push(Validation::fail(BuildError::ZeroHistoryCapacity));
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(problems) => Err(BuildError::from_problems(
                problems.iter().cloned().collect(),
            )),
        }
    }

    /// Build the engine.
    /// Returns every configuration problem found, not just the first.
    pub fn build(self) -> Result<Engine<S, A>, BuildError> {
        self.validate()?;

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let reducer = self
            .transitions
            .into_iter()
            .fold(Reducer::new(), Reducer::with_transition);

        let mut engine = Engine::with_config(reducer, initial, self.config);
        for observer in self.observers {
            engine.add_observer(observer);
        }

        Ok(engine)
    }
}

impl<S: State + 'static, A: Action + 'static> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
