//! Dispatch errors.

use thiserror::Error;

/// Errors returned by a dispatch or a state read.
///
/// Every variant leaves the engine's state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unsupported action kind '{kind}'")]
    UnsupportedActionKind { kind: String },

    #[error("Guard rejected action kind '{kind}'")]
    GuardRejected { kind: String },

    #[error("Engine has been disposed")]
    EngineDisposed,
}

impl DispatchError {
    /// Kind of the rejected action, when the error is about one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::UnsupportedActionKind { kind } | Self::GuardRejected { kind } => Some(kind),
            Self::EngineDisposed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_kind() {
        let err = DispatchError::UnsupportedActionKind {
            kind: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported action kind 'bogus'");
        assert_eq!(err.kind(), Some("bogus"));
    }

    #[test]
    fn disposed_has_no_kind() {
        assert_eq!(DispatchError::EngineDisposed.kind(), None);
        assert_eq!(
            DispatchError::EngineDisposed.to_string(),
            "Engine has been disposed"
        );
    }
}
