//! Build errors for engine and transition builders.

use thiserror::Error;

/// Errors that can occur when building engines and transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition kind must not be empty")]
    EmptyKind,

    #[error("Action kind '{kind}' registered more than once")]
    DuplicateKind { kind: String },

    #[error("History capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("Transition kind not specified. Call .kind(name)")]
    MissingKind,

    #[error("Transition function not specified. Call .apply(f) or .sets(state)")]
    MissingApply,

    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<BuildError>),
}

impl BuildError {
    /// Collapse accumulated problems: one stays as-is, several become `Invalid`.
    pub(crate) fn from_problems(mut problems: Vec<BuildError>) -> Self {
        if problems.len() == 1 {
            problems.remove(0)
        } else {
            BuildError::Invalid(problems)
        }
    }

    /// Individual problems, flattening `Invalid`.
    pub fn problems(&self) -> Vec<&BuildError> {
        match self {
            BuildError::Invalid(problems) => problems.iter().collect(),
            other => vec![other],
        }
    }
}

fn join(problems: &[BuildError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
